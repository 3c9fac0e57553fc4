//! In-memory RDF graph
//!
//! This crate provides the node model, triples, pattern queries and the
//! indexed [`Graph`] used by the rest of the rdfi workspace.
//!
//! # Key Design Principles
//!
//! 1. **Identity vs. equivalence** - every [`Node`] and [`Triple`] has an id
//!    from an injected [`IdSource`], but `==` always means RDF equivalence.
//!    A graph never stores two equivalent triples.
//!
//! 2. **Primitive-keyed indices** - triples are indexed by the native value of
//!    each position ([`Primitive`]). Lookups are narrowed by the index and then
//!    filtered by equivalence, since primitives can collide.
//!
//! 3. **Synchronous events** - [`Graph::subscribe`] handlers run in order, after
//!    the mutation is complete.
//!
//! # Example
//!
//! ```
//! use rdfi_graph::{Graph, NodeFactory, Pattern};
//!
//! let f = NodeFactory::default();
//! let b1 = f.blank_node(Some("b1"));
//! let name = f.named_node("http://xmlns.com/foaf/0.1/name").unwrap();
//!
//! let mut graph = Graph::new();
//! graph.add(f.triple(b1.clone(), name.clone(), f.string_literal("Alice")));
//! graph.add(f.triple(b1.clone(), name.clone(), f.string_literal("Alice")));
//! assert_eq!(graph.len(), 1);
//!
//! assert_eq!(graph.objects(&b1, &name).len(), 1);
//! assert_eq!(graph.find(&Pattern::any().subject("b1")).count(), 1);
//! ```

pub mod datatype;
pub mod error;
mod events;
mod factory;
mod graph;
pub mod ids;
mod index;
mod node;
pub mod ntriples;
mod pattern;
mod primitive;
mod term;
mod triple;

pub use datatype::Datatype;
pub use error::{GraphError, Result};
pub use events::{EventData, EventHandler, EventKind, GraphEvent, SubscriptionId};
pub use factory::{NodeFactory, ANON_LABEL_PREFIX};
pub use graph::Graph;
pub use ids::{IdSource, NodeId, SequentialIds, TripleId, UuidIds};
pub use node::Node;
pub use pattern::{Pattern, PatternTerm};
pub use primitive::Primitive;
pub use term::{Literal, NodeKind, Term};
pub use triple::Triple;
