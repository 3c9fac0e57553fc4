//! Indexed RDF graph
//!
//! `Graph` holds a set of triples, deduplicated by equivalence rather than
//! identity, behind three synchronized indices (see [`crate::index`]). Every
//! mutation updates all three indices, the node reference map and the
//! triple-id map before any event handler runs.
//!
//! Index keys are primitives, which can collide across non-equivalent nodes,
//! so every lookup is followed by an equivalence filter.
//!
//! A graph is not synchronized. Mutating it while iterating is prevented by
//! the borrow checker; sharing it across threads needs external locking.

use crate::events::{EventData, EventKind, GraphEvent, Listeners, SubscriptionId};
use crate::ids::{NodeId, TripleId};
use crate::index::{LiteralPredicate, TripleIndex, TripleKeys};
use crate::node::Node;
use crate::pattern::{Pattern, PatternTerm};
use crate::primitive::Primitive;
use crate::term::Term;
use crate::triple::Triple;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
struct NodeEntry {
    count: usize,
    node: Node,
}

/// A deduplicated, indexed set of triples
///
/// # Example
///
/// ```
/// use rdfi_graph::{Graph, NodeFactory, Pattern};
///
/// let f = NodeFactory::default();
/// let mut graph = Graph::new();
/// graph.add(f.triple(
///     f.blank_node(Some("b1")),
///     f.named_node("http://example.org/name").unwrap(),
///     f.string_literal("Alice"),
/// ));
///
/// let hits = graph.match_pattern(&Pattern::any().object("Alice"), 0);
/// assert_eq!(hits.len(), 1);
/// ```
#[derive(Default)]
pub struct Graph {
    primary: TripleIndex<LiteralPredicate>,
    secondary: TripleIndex<Primitive>,
    tertiary: TripleIndex<Primitive>,
    triples: FxHashMap<TripleId, Triple>,
    nodes: FxHashMap<NodeId, NodeEntry>,
    listeners: Listeners,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored triples
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert `triple` unless an equivalent triple is already stored.
    pub fn add(&mut self, triple: Triple) -> &mut Self {
        let keys = TripleKeys::of(&triple);
        if self
            .secondary
            .exact(&keys.p, &keys.o, &keys.s)
            .any(|stored| stored == &triple)
        {
            trace!(triple = %triple.id(), "equivalent triple already present");
            return self;
        }

        self.primary
            .insert(keys.s.clone(), keys.primary(), keys.o.clone(), triple.clone());
        self.secondary
            .insert(keys.p.clone(), keys.o.clone(), keys.s.clone(), triple.clone());
        self.tertiary.insert(keys.o, keys.s, keys.p, triple.clone());
        for node in triple.nodes() {
            self.retain_node(node);
        }
        self.triples.insert(triple.id().clone(), triple.clone());
        trace!(triple = %triple.id(), len = self.len(), "added triple");

        self.notify(EventKind::Add, || EventData::Triple(triple));
        self
    }

    /// Add every triple of `other`, in its iteration order
    pub fn add_all(&mut self, other: &Graph) -> &mut Self {
        for triple in other.iter() {
            self.add(triple.clone());
        }
        self
    }

    /// Remove every stored triple equivalent to `triple`.
    pub fn remove(&mut self, triple: &Triple) -> &mut Self {
        let found: Vec<Triple> = self.equivalent_triples(triple).cloned().collect();
        let Some(first) = found.first().cloned() else {
            return self;
        };
        for stored in &found {
            self.detach(stored);
        }
        trace!(triple = %first.id(), len = self.len(), "removed triple");

        self.notify(EventKind::Remove, || EventData::Triple(first));
        self
    }

    /// Remove every triple matching `pattern`; returns how many were removed.
    pub fn remove_matches(&mut self, pattern: &Pattern) -> usize {
        let matched: Vec<Triple> = self.find(pattern).cloned().collect();
        for triple in &matched {
            self.remove(triple);
        }
        debug!(removed = matched.len(), len = self.len(), "removed matching triples");
        matched.len()
    }

    /// Remove all triples.
    ///
    /// A `clear` event carrying the previous contents fires only if the
    /// graph was non-empty.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        let removed: Vec<Triple> = if self.listeners.wants(EventKind::Clear) {
            self.iter().cloned().collect()
        } else {
            Vec::new()
        };
        let count = self.len();

        self.primary.clear();
        self.secondary.clear();
        self.tertiary.clear();
        self.triples.clear();
        self.nodes.clear();
        debug!(removed = count, "cleared graph");

        self.notify(EventKind::Clear, || EventData::Triples(removed));
    }

    fn detach(&mut self, triple: &Triple) {
        let keys = TripleKeys::of(triple);
        let id = triple.id();
        self.primary.remove(&keys.s, &keys.primary(), &keys.o, id);
        self.secondary.remove(&keys.p, &keys.o, &keys.s, id);
        self.tertiary.remove(&keys.o, &keys.s, &keys.p, id);
        for node in triple.nodes() {
            self.release_node(node);
        }
        self.triples.remove(id);
    }

    fn retain_node(&mut self, node: &Node) {
        self.nodes
            .entry(node.id().clone())
            .or_insert_with(|| NodeEntry {
                count: 0,
                node: node.clone(),
            })
            .count += 1;
    }

    fn release_node(&mut self, node: &Node) {
        if let Some(entry) = self.nodes.get_mut(node.id()) {
            entry.count -= 1;
            if entry.count == 0 {
                self.nodes.remove(node.id());
            }
        }
    }

    fn notify(&mut self, kind: EventKind, data: impl FnOnce() -> EventData) {
        if self.listeners.wants(kind) {
            let event = GraphEvent { kind, data: data() };
            self.listeners.emit(&event);
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Register `handler` for events of `kind`.
    ///
    /// Handlers run synchronously, in subscription order. Graphs derived
    /// from this one (`merge`, `match_pattern`, `filter`, `clone`) start
    /// with no subscribers.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GraphEvent) + Send + 'static,
    {
        self.listeners.subscribe(kind, Box::new(handler))
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn has_triple(&self, triple: &Triple) -> bool {
        self.equivalent_triples(triple).next().is_some()
    }

    /// Whether any stored triple uses a node equivalent to `node`, in any position
    pub fn has_node(&self, node: &Node) -> bool {
        let key = node.primitive();
        self.primary.prefix1(&key).any(|t| t.subject() == node)
            || self.secondary.prefix1(&key).any(|t| t.predicate() == node)
            || self.tertiary.prefix1(&key).any(|t| t.object() == node)
    }

    /// Stored triples equivalent to `triple` (at most one)
    pub fn equivalent_triples<'a>(&'a self, triple: &'a Triple) -> impl Iterator<Item = &'a Triple> + 'a {
        let keys = TripleKeys::of(triple);
        self.secondary
            .exact(&keys.p, &keys.o, &keys.s)
            .filter(move |stored| *stored == triple)
    }

    /// Stored node instances equivalent to `node`
    pub fn equivalent_nodes<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .values()
            .map(|entry| &entry.node)
            .filter(move |stored| *stored == node)
    }

    /// The node instance with this id, if a stored triple references it
    pub fn node_by_id(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id).map(|entry| &entry.node)
    }

    pub fn triple_by_id(&self, id: &TripleId) -> Option<&Triple> {
        self.triples.get(id)
    }

    // ========================================================================
    // Pattern queries
    // ========================================================================

    /// Stream the triples matching `pattern`.
    pub fn find(&self, pattern: &Pattern) -> impl Iterator<Item = &Triple> + '_ {
        let candidates = self.candidates(pattern);
        let pattern = pattern.clone();
        candidates.filter(move |triple| pattern.matches(triple))
    }

    /// New graph with at most `limit` matching triples (0 = unbounded)
    pub fn match_pattern(&self, pattern: &Pattern, limit: usize) -> Graph {
        let limit = if limit == 0 { usize::MAX } else { limit };
        let mut result = Graph::new();
        for triple in self.find(pattern).take(limit) {
            result.add(triple.clone());
        }
        debug!(matched = result.len(), "matched pattern");
        result
    }

    /// Candidate triples from the index that covers the most bound positions
    fn candidates<'a>(&'a self, pattern: &Pattern) -> Box<dyn Iterator<Item = &'a Triple> + 'a> {
        match (&pattern.subject, &pattern.predicate, &pattern.object) {
            (Some(s), Some(p), Some(o)) => {
                let (sk, pk, ok) = (s.key(), p.key(), o.key());
                Box::new(
                    literal_flags(o)
                        .iter()
                        .flat_map(move |&lit| self.primary.exact(&sk, &(lit, pk.clone()), &ok)),
                )
            }
            (Some(s), Some(p), None) => {
                let (sk, pk) = (s.key(), p.key());
                Box::new(
                    [false, true]
                        .into_iter()
                        .flat_map(move |lit| self.primary.prefix2(&sk, &(lit, pk.clone()))),
                )
            }
            (None, Some(p), Some(o)) => Box::new(self.secondary.prefix2(&p.key(), &o.key())),
            (Some(s), None, Some(o)) => Box::new(self.tertiary.prefix2(&o.key(), &s.key())),
            (Some(s), None, None) => Box::new(self.primary.prefix1(&s.key())),
            (None, Some(p), None) => Box::new(self.secondary.prefix1(&p.key())),
            (None, None, Some(o)) => Box::new(self.tertiary.prefix1(&o.key())),
            (None, None, None) => Box::new(self.primary.iter()),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Distinct subjects, in first-seen order
    pub fn subjects(&self) -> Vec<&Node> {
        distinct(self.iter().map(Triple::subject))
    }

    /// Distinct predicates used with `subject`
    pub fn predicates(&self, subject: &Node) -> Vec<&Node> {
        distinct(
            self.find(&Pattern::any().subject(subject))
                .map(Triple::predicate),
        )
    }

    /// Distinct objects of `subject` and `predicate`
    pub fn objects(&self, subject: &Node, predicate: &Node) -> Vec<&Node> {
        distinct(
            self.find(&Pattern::any().subject(subject).predicate(predicate))
                .map(Triple::object),
        )
    }

    /// Distinct literal objects of `subject`, optionally restricted to `predicate`
    pub fn literals(&self, subject: &Node, predicate: Option<&Node>) -> Vec<&Node> {
        distinct(self.literal_objects(subject, predicate))
    }

    pub fn subject_has_literals(&self, subject: &Node) -> bool {
        self.literal_objects(subject, None).next().is_some()
    }

    pub fn predicate_has_literals(&self, subject: &Node, predicate: &Node) -> bool {
        self.literal_objects(subject, Some(predicate)).next().is_some()
    }

    fn literal_objects(&self, subject: &Node, predicate: Option<&Node>) -> impl Iterator<Item = &Node> + '_ {
        let mut pattern = Pattern::any().subject(subject);
        pattern.predicate = predicate.map(PatternTerm::from);
        self.find(&pattern)
            .map(Triple::object)
            .filter(|object| object.is_literal())
    }

    // ========================================================================
    // Traversal and set operations
    // ========================================================================

    /// All triples, in primary-index order (not insertion order)
    pub fn iter(&self) -> impl Iterator<Item = &Triple> + '_ {
        self.primary.iter()
    }

    pub fn to_vec(&self) -> Vec<Triple> {
        self.iter().cloned().collect()
    }

    pub fn some(&self, pred: impl FnMut(&Triple) -> bool) -> bool {
        self.iter().any(pred)
    }

    pub fn every(&self, pred: impl FnMut(&Triple) -> bool) -> bool {
        self.iter().all(pred)
    }

    pub fn for_each(&self, f: impl FnMut(&Triple)) {
        self.iter().for_each(f)
    }

    /// New graph with the triples that satisfy `pred`
    pub fn filter(&self, mut pred: impl FnMut(&Triple) -> bool) -> Graph {
        self.iter().filter(|t| pred(t)).cloned().collect()
    }

    /// New graph holding the union of both graphs; neither input changes
    pub fn merge(&self, other: &Graph) -> Graph {
        let mut result = self.clone();
        result.add_all(other);
        result
    }
}

fn literal_flags(object: &PatternTerm) -> &'static [bool] {
    match object.literal_flag() {
        Some(false) => &[false],
        Some(true) => &[true],
        None => &[false, true],
    }
}

fn distinct<'a>(nodes: impl Iterator<Item = &'a Node>) -> Vec<&'a Node> {
    let mut seen: FxHashSet<&Term> = FxHashSet::default();
    let mut out = Vec::new();
    for node in nodes {
        if seen.insert(node.term()) {
            out.push(node);
        }
    }
    out
}

impl Clone for Graph {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
            tertiary: self.tertiary.clone(),
            triples: self.triples.clone(),
            nodes: self.nodes.clone(),
            listeners: Listeners::default(),
        }
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("len", &self.len())
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// N-Triples document: one `<s> <p> <o> .` line per triple
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in self.iter() {
            writeln!(f, "{} .", triple)?;
        }
        Ok(())
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.add(triple);
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = Box<dyn Iterator<Item = &'a Triple> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
