//! Triple patterns for `match`/`find`/`remove_matches`
//!
//! A pattern binds zero to three triple positions. A bound position is
//! either a node (matched by equivalence) or a native value (matched against
//! the node's primitive, so `"b1"` matches `<b1>`, `_:b1` and `"b1"`).

use crate::error::{GraphError, Result};
use crate::node::Node;
use crate::primitive::Primitive;
use crate::triple::Triple;
use serde_json::Value as JsonValue;

/// One bound position of a [`Pattern`]
#[derive(Clone, Debug)]
pub enum PatternTerm {
    Node(Node),
    Value(Primitive),
}

impl PatternTerm {
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            PatternTerm::Node(n) => n == node,
            PatternTerm::Value(v) => node.equals_value(v),
        }
    }

    /// Index key for this position
    pub(crate) fn key(&self) -> Primitive {
        match self {
            PatternTerm::Node(n) => n.primitive(),
            PatternTerm::Value(v) => v.clone(),
        }
    }

    /// Whether the matched node must be a literal, if known
    pub(crate) fn literal_flag(&self) -> Option<bool> {
        match self {
            PatternTerm::Node(n) => Some(n.is_literal()),
            PatternTerm::Value(_) => None,
        }
    }

    fn from_json(position: &str, value: &JsonValue) -> Result<Option<Self>> {
        let primitive = match value {
            JsonValue::Null => return Ok(None),
            JsonValue::String(s) => Primitive::text(s),
            JsonValue::Bool(b) => Primitive::Boolean(*b),
            JsonValue::Number(n) => match n.as_f64() {
                Some(f) => Primitive::number(f),
                None => {
                    return Err(GraphError::invalid(format!(
                        "pattern {} is not a representable number: {}",
                        position, n
                    )))
                }
            },
            other => {
                return Err(GraphError::invalid(format!(
                    "pattern {} must be a string, number, boolean or null, got {}",
                    position, other
                )))
            }
        };
        Ok(Some(PatternTerm::Value(primitive)))
    }
}

impl From<Node> for PatternTerm {
    fn from(node: Node) -> Self {
        PatternTerm::Node(node)
    }
}

impl From<&Node> for PatternTerm {
    fn from(node: &Node) -> Self {
        PatternTerm::Node(node.clone())
    }
}

impl From<Primitive> for PatternTerm {
    fn from(value: Primitive) -> Self {
        PatternTerm::Value(value)
    }
}

macro_rules! value_pattern_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PatternTerm {
                fn from(value: $t) -> Self {
                    PatternTerm::Value(Primitive::from(value))
                }
            }
        )*
    };
}

value_pattern_from!(&str, String, bool, i32, i64, f64);

/// A partial triple; unbound positions are wildcards
#[derive(Clone, Debug, Default)]
pub struct Pattern {
    pub subject: Option<PatternTerm>,
    pub predicate: Option<PatternTerm>,
    pub object: Option<PatternTerm>,
}

impl Pattern {
    /// The pattern that matches every triple
    pub fn any() -> Self {
        Self::default()
    }

    pub fn subject(mut self, term: impl Into<PatternTerm>) -> Self {
        self.subject = Some(term.into());
        self
    }

    pub fn predicate(mut self, term: impl Into<PatternTerm>) -> Self {
        self.predicate = Some(term.into());
        self
    }

    pub fn object(mut self, term: impl Into<PatternTerm>) -> Self {
        self.object = Some(term.into());
        self
    }

    pub fn is_unbound(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }

    /// Check every bound position against `triple`
    pub fn matches(&self, triple: &Triple) -> bool {
        let check = |pos: &Option<PatternTerm>, node: &Node| pos.as_ref().map_or(true, |p| p.matches(node));
        check(&self.subject, triple.subject())
            && check(&self.predicate, triple.predicate())
            && check(&self.object, triple.object())
    }

    /// Build a pattern from a JSON object such as `{"subject": "b1", "object": 1}`.
    ///
    /// Members are optional and `null` means unbound. Unknown members and
    /// non-scalar values are rejected.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            GraphError::invalid(format!("pattern must be a JSON object, got {}", value))
        })?;

        let mut pattern = Pattern::any();
        for (key, member) in obj {
            let term = PatternTerm::from_json(key, member)?;
            match key.as_str() {
                "subject" => pattern.subject = term,
                "predicate" => pattern.predicate = term,
                "object" => pattern.object = term,
                other => {
                    return Err(GraphError::invalid(format!(
                        "unknown pattern member: {}",
                        other
                    )))
                }
            }
        }
        Ok(pattern)
    }
}
