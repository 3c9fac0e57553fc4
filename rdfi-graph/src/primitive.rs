//! Comparable native values
//!
//! Every node reduces to a [`Primitive`]: named and blank nodes to their
//! string value, literals to a datatype-aware decoding of their lexical
//! form. Primitives are the keys of the graph indices and the values that
//! pattern queries compare against.

use crate::datatype::Datatype;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A native value a node can be compared with
///
/// Distinct nodes may share a primitive (`<b1>`, `_:b1` and `"b1"` are all
/// `Text("b1")`; `"1"` and `"01"` typed `xsd:integer` are both `Number(1.0)`),
/// so a primitive match is only ever a candidate for node equivalence.
#[derive(Clone, Debug)]
pub enum Primitive {
    Text(Arc<str>),
    Boolean(bool),
    Number(f64),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
}

impl Primitive {
    pub fn text(value: impl AsRef<str>) -> Self {
        Primitive::Text(Arc::from(value.as_ref()))
    }

    /// Create a number, folding `-0.0` into `0.0`
    pub fn number(value: f64) -> Self {
        Primitive::Number(if value == 0.0 { 0.0 } else { value })
    }

    /// Decode a literal's lexical form according to its datatype.
    ///
    /// Falls back to `Text(lexical)` when the datatype has no native
    /// counterpart or the lexical form is not valid for it.
    pub fn decode(lexical: &str, datatype: &Datatype) -> Self {
        let decoded = if datatype.is_boolean() {
            decode_boolean(lexical)
        } else if datatype.is_numeric() {
            lexical.trim().parse::<f64>().ok().map(Primitive::number)
        } else if datatype.is_temporal() {
            decode_timestamp(lexical.trim()).map(Primitive::Timestamp)
        } else {
            None
        };
        decoded.unwrap_or_else(|| Primitive::text(lexical))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Primitive::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Primitive::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Primitive::Text(_) => 0,
            Primitive::Boolean(_) => 1,
            Primitive::Number(_) => 2,
            Primitive::Timestamp(_) => 3,
        }
    }
}

fn decode_boolean(lexical: &str) -> Option<Primitive> {
    match lexical.trim() {
        "true" | "1" => Some(Primitive::Boolean(true)),
        "false" | "0" => Some(Primitive::Boolean(false)),
        _ => None,
    }
}

/// `xsd:dateTime` with or without offset, or `xsd:date`; offset-less values are UTC.
fn decode_timestamp(lexical: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(lexical) {
        return Some(dt.timestamp_millis());
    }
    let naive = lexical.strip_suffix('Z').unwrap_or(lexical);
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Primitive {}

impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Primitive::Text(s) => s.hash(state),
            Primitive::Boolean(b) => b.hash(state),
            Primitive::Number(n) => n.to_bits().hash(state),
            Primitive::Timestamp(ms) => ms.hash(state),
        }
    }
}

impl PartialOrd for Primitive {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Primitive {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Primitive::Text(a), Primitive::Text(b)) => a.cmp(b),
            (Primitive::Boolean(a), Primitive::Boolean(b)) => a.cmp(b),
            (Primitive::Number(a), Primitive::Number(b)) => a.total_cmp(b),
            (Primitive::Timestamp(a), Primitive::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Text(s) => f.write_str(s),
            Primitive::Boolean(b) => write!(f, "{}", b),
            Primitive::Number(n) => write!(f, "{}", n),
            Primitive::Timestamp(ms) => match DateTime::<Utc>::from_timestamp_millis(*ms) {
                Some(dt) => write!(f, "{}", dt.to_rfc3339()),
                None => write!(f, "{}", ms),
            },
        }
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::text(value)
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::Text(Arc::from(value))
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Boolean(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::number(value as f64)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::number(value as f64)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::number(value)
    }
}

impl From<DateTime<Utc>> for Primitive {
    fn from(value: DateTime<Utc>) -> Self {
        Primitive::Timestamp(value.timestamp_millis())
    }
}
