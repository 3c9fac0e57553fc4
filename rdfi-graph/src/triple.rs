//! RDF triple: subject, predicate, object plus an id

use crate::ids::{IdSource, TripleId};
use crate::node::Node;
use std::fmt;

/// A single RDF statement
///
/// `==` is structural: all three components equivalent. The id is ignored.
#[derive(Clone, Debug)]
pub struct Triple {
    id: TripleId,
    subject: Node,
    predicate: Node,
    object: Node,
}

impl Triple {
    /// Create a triple with a fresh id from `ids`
    pub fn new(ids: &dyn IdSource, subject: Node, predicate: Node, object: Node) -> Self {
        Self::with_id(TripleId::generate(ids), subject, predicate, object)
    }

    pub fn with_id(id: TripleId, subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            id,
            subject,
            predicate,
            object,
        }
    }

    pub fn id(&self) -> &TripleId {
        &self.id
    }

    pub fn subject(&self) -> &Node {
        &self.subject
    }

    pub fn predicate(&self) -> &Node {
        &self.predicate
    }

    pub fn object(&self) -> &Node {
        &self.object
    }

    /// Components in subject, predicate, object order
    pub fn nodes(&self) -> [&Node; 3] {
        [&self.subject, &self.predicate, &self.object]
    }

    pub fn same_instance(&self, other: &Triple) -> bool {
        self.id == other.id
    }
}

impl PartialEq for Triple {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
    }
}

impl Eq for Triple {}

impl std::hash::Hash for Triple {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.predicate.hash(state);
        self.object.hash(state);
    }
}

/// `<s> <p> <o>` in N-Triples syntax, without the terminating ` .`
impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}
