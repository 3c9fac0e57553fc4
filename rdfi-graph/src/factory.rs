//! Node and triple construction with an injected id source

use crate::datatype::Datatype;
use crate::error::{GraphError, Result};
use crate::ids::{IdSource, SequentialIds};
use crate::node::Node;
use crate::term::{Literal, Term};
use crate::triple::Triple;
use std::borrow::Cow;
use std::sync::Arc;

/// Label prefix of anonymous blank nodes.
///
/// `:` is not allowed in a Turtle blank node label, so no parsed `_:label`
/// falls in this range. [`NodeFactory::blank_node`] keeps other explicit
/// labels out of it.
pub const ANON_LABEL_PREFIX: &str = "anon:";

/// Builds nodes and triples, drawing every id from one shared source
///
/// Anonymous blank nodes get the label `anon:{id}`.
#[derive(Clone, Debug)]
pub struct NodeFactory {
    ids: Arc<dyn IdSource>,
}

impl NodeFactory {
    pub fn new(ids: Arc<dyn IdSource>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &dyn IdSource {
        self.ids.as_ref()
    }

    pub fn id_source(&self) -> Arc<dyn IdSource> {
        Arc::clone(&self.ids)
    }

    pub fn node(&self, term: Term) -> Node {
        Node::with_source(self.ids(), term)
    }

    /// Named node; the IRI must be non-empty
    pub fn named_node(&self, iri: impl AsRef<str>) -> Result<Node> {
        let iri = iri.as_ref();
        if iri.is_empty() {
            return Err(GraphError::invalid("named node IRI must not be empty"));
        }
        Ok(self.node(Term::named(iri)))
    }

    /// Blank node with the given label, or a fresh one.
    ///
    /// A fresh node never equals a labelled one: an explicit label that
    /// would fall in the anonymous range (`anon:...`, `_anon:...`, ...) gets
    /// one more leading `_`.
    pub fn blank_node(&self, label: Option<&str>) -> Node {
        let term = match label {
            Some(l) => Term::blank(explicit_label(l)),
            None => Term::blank(format!("{}{}", ANON_LABEL_PREFIX, self.ids.next_id())),
        };
        self.node(term)
    }

    /// Literal with an optional language tag or datatype IRI
    pub fn literal(
        &self,
        lexical: impl AsRef<str>,
        language: Option<&str>,
        datatype: Option<&str>,
    ) -> Result<Node> {
        let lit = Literal::new(lexical, language, datatype.map(Datatype::from_iri))?;
        Ok(self.node(Term::Literal(lit)))
    }

    pub fn string_literal(&self, lexical: impl AsRef<str>) -> Node {
        self.node(Term::string(lexical))
    }

    pub fn from_nt(&self, text: &str) -> Result<Node> {
        Node::from_nt(text, self.ids())
    }

    pub fn triple(&self, subject: Node, predicate: Node, object: Node) -> Triple {
        Triple::new(self.ids(), subject, predicate, object)
    }
}

fn explicit_label(label: &str) -> Cow<'_, str> {
    if label.trim_start_matches('_').starts_with(ANON_LABEL_PREFIX) {
        Cow::Owned(format!("_{}", label))
    } else {
        Cow::Borrowed(label)
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new(Arc::new(SequentialIds::new("")))
    }
}
