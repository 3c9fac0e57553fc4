//! Turtle reader: text in, populated graph and profile out.

use rdfi_graph::{Graph, NodeFactory, Triple};
use rdfi_profile::Profile;
use tracing::debug;

use crate::config::ReaderConfig;
use crate::error::{Result, TurtleError};
use crate::lex::tokenize;
use crate::parser;
use crate::sink::{CallbackSink, GraphBuilder, TripleFilter};

/// Where parsed triples and directives go.
///
/// The graph and profile are moved in and handed back by
/// [`TurtleReader::parse`], so a parse never shares its target with another
/// mutator.
#[derive(Default)]
pub struct ParseTarget {
    pub graph: Graph,
    pub profile: Profile,
    pub filter: Option<TripleFilter>,
}

impl ParseTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(mut self, graph: Graph) -> Self {
        self.graph = graph;
        self
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Keep only triples for which `filter` returns true.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Triple) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }
}

/// Parses Turtle documents.
///
/// Nodes are built with the reader's [`NodeFactory`]; share a factory with
/// the rest of the application to keep ids unique across sources.
///
/// # Example
///
/// ```
/// use rdfi_turtle::{ParseTarget, TurtleReader};
///
/// let reader = TurtleReader::default();
/// let (graph, profile) = reader
///     .parse(
///         r#"@prefix ex: <http://example.org/> . ex:a ex:b "c" ."#,
///         ParseTarget::new(),
///     )
///     .unwrap();
/// assert_eq!(graph.len(), 1);
/// assert_eq!(profile.prefixes().namespace("ex"), Some("http://example.org/"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TurtleReader {
    config: ReaderConfig,
    factory: NodeFactory,
}

impl TurtleReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            factory: NodeFactory::default(),
        }
    }

    pub fn with_factory(mut self, factory: NodeFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    /// Parse `input` into the target graph and profile.
    ///
    /// On error the target is dropped; nothing is partially returned.
    pub fn parse(&self, input: &str, target: ParseTarget) -> Result<(Graph, Profile)> {
        let span = tracing::debug_span!(
            "turtle_parse",
            input_len = input.len(),
            tokens = tracing::field::Empty,
            triples = tracing::field::Empty,
        );
        let _guard = span.enter();

        let tokens = tokenize(input)?;
        span.record("tokens", tokens.len());

        let ParseTarget {
            graph,
            profile,
            filter,
        } = target;
        let mut builder = GraphBuilder::new(graph, profile).with_filter(filter);
        let emitted = parser::parse(tokens, &mut builder, self.factory.clone(), &self.config)?;
        span.record("triples", emitted);

        debug!(
            emitted,
            rejected = builder.rejected(),
            graph_len = builder.graph().len(),
            "turtle document parsed"
        );
        Ok(builder.finish())
    }

    /// [`parse`](Self::parse) on tokio's blocking pool.
    pub async fn parse_async(&self, input: String, target: ParseTarget) -> Result<(Graph, Profile)> {
        let reader = self.clone();
        tokio::task::spawn_blocking(move || reader.parse(&input, target))
            .await
            .map_err(|e| TurtleError::Task(e.to_string()))?
    }

    /// Stream triples to `callback` without building a graph.
    ///
    /// Returns the number of triples delivered. Triples before a syntax
    /// error have already been delivered when the error is returned.
    pub fn process<F>(&self, input: &str, callback: F) -> Result<usize>
    where
        F: FnMut(Triple),
    {
        let _span = tracing::debug_span!("turtle_process", input_len = input.len()).entered();

        let tokens = tokenize(input)?;
        let mut sink = CallbackSink::new(callback);
        parser::parse(tokens, &mut sink, self.factory.clone(), &self.config)?;
        Ok(sink.count())
    }
}
