//! Destinations for parsed triples.
//!
//! The parser drives a [`TripleSink`]: directives arrive through `on_base` and
//! `on_prefix`, statements through `emit_triple`. [`GraphBuilder`] is the
//! sink behind [`crate::TurtleReader::parse`].

use rdfi_graph::{Graph, Triple};
use rdfi_profile::Profile;
use tracing::trace;

/// Predicate deciding whether a parsed triple is kept.
pub type TripleFilter = Box<dyn Fn(&Triple) -> bool + Send + Sync>;

/// Receiver for parser events.
pub trait TripleSink {
    /// `@base` / `BASE`, with the IRI already resolved against the previous base.
    fn on_base(&mut self, _iri: &str) {}

    /// `@prefix` / `PREFIX`.
    fn on_prefix(&mut self, _prefix: &str, _namespace: &str) {}

    fn emit_triple(&mut self, triple: Triple);
}

impl TripleSink for Graph {
    fn emit_triple(&mut self, triple: Triple) {
        self.add(triple);
    }
}

impl TripleSink for Vec<Triple> {
    fn emit_triple(&mut self, triple: Triple) {
        self.push(triple);
    }
}

/// Adds triples to a graph and records directives in a profile.
///
/// `@prefix` binds the prefix in the profile. `@base` sets the profile's
/// default prefix, so `:local` and relative names share a namespace when
/// the document is written back out.
pub struct GraphBuilder {
    graph: Graph,
    profile: Profile,
    filter: Option<TripleFilter>,
    rejected: usize,
}

impl GraphBuilder {
    pub fn new(graph: Graph, profile: Profile) -> Self {
        Self {
            graph,
            profile,
            filter: None,
            rejected: 0,
        }
    }

    pub fn with_filter(mut self, filter: Option<TripleFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Triples dropped by the filter so far
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn finish(self) -> (Graph, Profile) {
        (self.graph, self.profile)
    }
}

impl TripleSink for GraphBuilder {
    fn on_base(&mut self, iri: &str) {
        self.profile.set_default_prefix(iri);
    }

    fn on_prefix(&mut self, prefix: &str, namespace: &str) {
        self.profile.set_prefix(prefix, namespace);
    }

    fn emit_triple(&mut self, triple: Triple) {
        if let Some(filter) = &self.filter {
            if !filter(&triple) {
                trace!(%triple, "triple rejected by filter");
                self.rejected += 1;
                return;
            }
        }
        self.graph.add(triple);
    }
}

/// Hands every triple to a closure. Directives are ignored.
pub struct CallbackSink<F> {
    callback: F,
    count: usize,
}

impl<F: FnMut(Triple)> CallbackSink<F> {
    pub fn new(callback: F) -> Self {
        Self { callback, count: 0 }
    }

    /// Triples delivered so far
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<F: FnMut(Triple)> TripleSink for CallbackSink<F> {
    fn emit_triple(&mut self, triple: Triple) {
        self.count += 1;
        (self.callback)(triple);
    }
}
