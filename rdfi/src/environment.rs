//! One place to create nodes, triples, graphs and maps.

use std::sync::Arc;

use rdfi_graph::{Graph, IdSource, Node, NodeFactory, Triple};
use rdfi_profile::{PrefixMap, Profile, TermMap};
use rdfi_turtle::{ParseTarget, ReaderConfig, TurtleReader, TurtleWriter, WriterConfig};
use tracing::debug;

use crate::config::EnvironmentConfig;
use crate::error::Result;

/// A [`Profile`] paired with the [`NodeFactory`] that every node made through
/// this environment comes from.
///
/// Names passed to `create_*` go through the profile first: `ex:foo` is
/// expanded with the prefixes, a bare `name` with the terms. Anything the
/// profile cannot resolve is taken as an IRI as written.
///
/// # Example
///
/// ```
/// use rdfi::RdfEnvironment;
///
/// let mut env = RdfEnvironment::new();
/// env.set_prefix("ex", "http://example.org/");
///
/// let alice = env.create_named_node("ex:alice").unwrap();
/// assert_eq!(alice.value(), "http://example.org/alice");
///
/// let name = env.create_literal("Alice", Some("en"), None).unwrap();
/// let triple = env.create_triple(alice.clone(), env.create_named_node("ex:name").unwrap(), name);
/// let graph = env.create_graph([triple]);
/// assert_eq!(graph.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct RdfEnvironment {
    profile: Profile,
    factory: NodeFactory,
}

impl Default for RdfEnvironment {
    fn default() -> Self {
        EnvironmentConfig::default().build()
    }
}

impl RdfEnvironment {
    /// Built-in prefixes (`owl`, `rdf`, `rdfa`, `rdfs`, `xsd`) and sequential ids.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(profile: Profile, factory: NodeFactory) -> Self {
        Self { profile, factory }
    }

    /// Use `ids` for every node and triple created from now on.
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.factory = NodeFactory::new(ids);
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn prefixes(&self) -> &PrefixMap {
        self.profile.prefixes()
    }

    pub fn terms(&self) -> &TermMap {
        self.profile.terms()
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    // ------------------------------------------------------------------------
    // Profile delegation
    // ------------------------------------------------------------------------

    pub fn resolve(&self, token: &str) -> Option<String> {
        self.profile.resolve(token)
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> &mut Self {
        self.profile.set_prefix(prefix, iri);
        self
    }

    pub fn set_term(&mut self, term: impl Into<String>, iri: impl Into<String>) -> &mut Self {
        self.profile.set_term(term, iri);
        self
    }

    pub fn set_default_prefix(&mut self, iri: impl Into<String>) -> &mut Self {
        self.profile.set_default_prefix(iri);
        self
    }

    pub fn set_default_vocabulary(&mut self, iri: impl Into<String>) -> &mut Self {
        self.profile.set_default_vocabulary(iri);
        self
    }

    pub fn import_profile(&mut self, other: &Profile, overwrite: bool) -> &mut Self {
        self.profile.import_profile(other, overwrite);
        self
    }

    /// Resolve through the profile, or keep `value` as written.
    fn expand(&self, value: &str) -> String {
        self.profile
            .resolve(value)
            .unwrap_or_else(|| value.to_string())
    }

    // ------------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------------

    /// Named node from an IRI, a CURIE or a term.
    pub fn create_named_node(&self, value: &str) -> Result<Node> {
        Ok(self.factory.named_node(self.expand(value))?)
    }

    /// Blank node with `label`, or a fresh one.
    pub fn create_blank_node(&self, label: Option<&str>) -> Node {
        self.factory.blank_node(label)
    }

    /// Literal; `datatype` may be an IRI, a CURIE (`xsd:integer`) or a term.
    pub fn create_literal(
        &self,
        value: &str,
        language: Option<&str>,
        datatype: Option<&str>,
    ) -> Result<Node> {
        let datatype = datatype.map(|dt| self.expand(dt));
        Ok(self.factory.literal(value, language, datatype.as_deref())?)
    }

    pub fn create_triple(&self, subject: Node, predicate: Node, object: Node) -> Triple {
        self.factory.triple(subject, predicate, object)
    }

    pub fn create_graph(&self, triples: impl IntoIterator<Item = Triple>) -> Graph {
        triples.into_iter().collect()
    }

    /// A callback that runs `action` on the triples that pass `test`.
    ///
    /// ```
    /// # use rdfi::RdfEnvironment;
    /// let env = RdfEnvironment::new();
    /// let mut literals = 0;
    /// let mut count_literals = env.create_action(|t| t.object().is_literal(), |_| literals += 1);
    ///
    /// let s = env.create_blank_node(None);
    /// let p = env.create_named_node("rdf:value").unwrap();
    /// count_literals(&env.create_triple(s.clone(), p.clone(), env.create_literal("x", None, None).unwrap()));
    /// count_literals(&env.create_triple(s.clone(), p, s));
    /// drop(count_literals);
    /// assert_eq!(literals, 1);
    /// ```
    pub fn create_action<T, A>(&self, test: T, mut action: A) -> impl FnMut(&Triple)
    where
        T: Fn(&Triple) -> bool,
        A: FnMut(&Triple),
    {
        move |triple: &Triple| {
            if test(triple) {
                action(triple);
            }
        }
    }

    /// A copy of this environment's profile, or an empty one.
    pub fn create_profile(&self, empty: bool) -> Profile {
        if empty {
            Profile::default()
        } else {
            self.profile.clone()
        }
    }

    pub fn create_prefix_map(&self, empty: bool) -> PrefixMap {
        if empty {
            PrefixMap::new()
        } else {
            self.profile.prefixes().clone()
        }
    }

    pub fn create_term_map(&self, empty: bool) -> TermMap {
        if empty {
            TermMap::new()
        } else {
            self.profile.terms().clone()
        }
    }

    // ------------------------------------------------------------------------
    // Turtle
    // ------------------------------------------------------------------------

    /// Parse a Turtle document with this environment's factory.
    ///
    /// The document's prefixes are imported into the environment's profile
    /// without replacing existing bindings.
    pub fn read_turtle(&mut self, input: &str) -> Result<Graph> {
        self.read_turtle_with(input, ReaderConfig::default())
    }

    pub fn read_turtle_with(&mut self, input: &str, config: ReaderConfig) -> Result<Graph> {
        let reader = TurtleReader::new(config).with_factory(self.factory.clone());
        let (graph, profile) = reader.parse(input, ParseTarget::new())?;
        self.profile.import_profile(&profile, false);
        debug!(triples = graph.len(), prefixes = self.prefixes().len(), "turtle read into environment");
        Ok(graph)
    }

    /// Serialize `graph`, abbreviating with this environment's prefixes.
    pub fn write_turtle(&self, graph: &Graph) -> String {
        self.write_turtle_with(graph, WriterConfig::default())
    }

    pub fn write_turtle_with(&self, graph: &Graph, config: WriterConfig) -> String {
        TurtleWriter::new(config).serialize(graph, Some(&self.profile))
    }
}
