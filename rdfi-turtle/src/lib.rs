//! Turtle reader and writer for rdfi graphs.
//!
//! [`TurtleReader`] parses a document into a [`Graph`](rdfi_graph::Graph)
//! and records its `@prefix`/`@base` directives in a
//! [`Profile`](rdfi_profile::Profile). [`TurtleWriter`] goes the other way,
//! abbreviating IRIs through the profile's prefixes.
//!
//! # Example
//!
//! ```
//! use rdfi_turtle::{ParseTarget, TurtleReader, TurtleWriter};
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:name "Alice" ;
//!              ex:age 30 .
//! "#;
//!
//! let (graph, profile) = TurtleReader::default()
//!     .parse(turtle, ParseTarget::new())
//!     .unwrap();
//! assert_eq!(graph.len(), 2);
//!
//! let text = TurtleWriter::default().serialize(&graph, Some(&profile));
//! assert!(text.starts_with("@prefix ex: <http://example.org/> ."));
//! ```
//!
//! Lower layers are public for callers that want the tokens or their own
//! [`TripleSink`].

pub mod config;
pub mod error;
pub mod iri;
pub mod lex;
pub mod parser;
mod reader;
pub mod sink;
mod writer;

pub use config::{ReaderConfig, WriterConfig};
pub use error::{Result, TurtleError};
pub use lex::{tokenize, Lexer, Token, TokenKind};
pub use reader::{ParseTarget, TurtleReader};
pub use sink::{CallbackSink, GraphBuilder, TripleFilter, TripleSink};
pub use writer::TurtleWriter;
