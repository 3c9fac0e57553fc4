//! Nodes: a term plus a process-unique identity

use crate::error::Result;
use crate::ids::{IdSource, NodeId};
use crate::ntriples;
use crate::primitive::Primitive;
use crate::term::{Literal, NodeKind, Term};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A term with an id
///
/// `==` is RDF equivalence of the terms and ignores ids; two nodes built
/// independently from the same IRI compare equal. Use [`Node::same_instance`]
/// to ask whether two handles refer to the same constructed node.
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    term: Term,
}

impl Node {
    pub fn new(id: NodeId, term: Term) -> Self {
        Self { id, term }
    }

    /// Wrap `term` with a fresh id drawn from `ids`
    pub fn with_source(ids: &dyn IdSource, term: Term) -> Self {
        Self::new(NodeId::generate(ids), term)
    }

    /// Parse an N-Triples term and give it a fresh id
    pub fn from_nt(text: &str, ids: &dyn IdSource) -> Result<Self> {
        Ok(Self::with_source(ids, ntriples::parse_term(text)?))
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn into_term(self) -> Term {
        self.term
    }

    pub fn kind(&self) -> NodeKind {
        self.term.kind()
    }

    /// IRI, blank label, or literal lexical form
    pub fn value(&self) -> &str {
        self.term.value()
    }

    pub fn is_named(&self) -> bool {
        self.term.is_named()
    }

    pub fn is_blank(&self) -> bool {
        self.term.is_blank()
    }

    pub fn is_literal(&self) -> bool {
        self.term.is_literal()
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        self.term.as_literal()
    }

    pub fn primitive(&self) -> Primitive {
        self.term.primitive()
    }

    /// Compare this node's native value against `value`
    pub fn equals_value(&self, value: &Primitive) -> bool {
        self.term.equals_value(value)
    }

    pub fn same_instance(&self, other: &Node) -> bool {
        self.id == other.id
    }

    /// N-Triples rendering
    pub fn to_nt(&self) -> String {
        self.term.to_string()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.term.hash(state);
    }
}

impl PartialEq<Term> for Node {
    fn eq(&self, other: &Term) -> bool {
        &self.term == other
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}
