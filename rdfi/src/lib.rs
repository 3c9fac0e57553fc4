//! In-memory RDF for Rust
//!
//! This crate bundles the rdfi workspace behind one import:
//!
//! - [`rdfi_graph`]: nodes, triples, pattern queries and the indexed [`Graph`]
//! - [`rdfi_profile`]: [`PrefixMap`], [`TermMap`] and [`Profile`]
//! - [`rdfi_turtle`]: [`TurtleReader`] and [`TurtleWriter`]
//! - [`rdfi_vocab`]: well-known namespace IRIs
//!
//! [`RdfEnvironment`] ties them together: a profile for resolving names and a
//! node factory for ids, built from an [`EnvironmentConfig`].
//!
//! # Example
//!
//! ```
//! use rdfi::{EnvironmentConfig, Pattern};
//!
//! let config = EnvironmentConfig::from_json(
//!     r#"{ "idPrefix": "n", "prefixes": { "ex": "http://example.org/" } }"#,
//! )
//! .unwrap();
//! let mut env = config.build();
//!
//! let graph = env
//!     .read_turtle(
//!         "@prefix ex: <http://example.org/> .
//!          ex:alice ex:knows ex:bob , ex:carol .",
//!     )
//!     .unwrap();
//! let alice = env.create_named_node("ex:alice").unwrap();
//! assert_eq!(graph.find(&Pattern::any().subject(alice)).count(), 2);
//!
//! let text = env.write_turtle(&graph);
//! assert!(text.starts_with("@prefix ex: <http://example.org/> ."));
//! ```

pub mod config;
mod environment;
pub mod error;

pub use config::{EnvironmentConfig, IdScheme};
pub use environment::RdfEnvironment;
pub use error::{Error, Result};

pub use rdfi_graph::{
    Datatype, EventKind, Graph, GraphError, GraphEvent, IdSource, Literal, Node, NodeFactory,
    NodeId, Pattern, PatternTerm, SequentialIds, SubscriptionId, Term, Triple, TripleId, UuidIds,
};
pub use rdfi_profile::{PrefixMap, Profile, TermMap};
pub use rdfi_turtle::{
    ParseTarget, ReaderConfig, TripleFilter, TurtleError, TurtleReader, TurtleWriter,
    WriterConfig,
};

pub use rdfi_graph as graph;
pub use rdfi_profile as profile;
pub use rdfi_turtle as turtle;
pub use rdfi_vocab as vocab;
