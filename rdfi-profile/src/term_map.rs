//! Term to IRI mapping

use crate::bimap::OneToOneMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// One-to-one map between bare terms and full IRIs
///
/// Terms that are not bound resolve against the default vocabulary, if one
/// is set. The default vocabulary is not part of the serialized form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct TermMap {
    map: OneToOneMap<String, String>,
    default: Option<String>,
}

impl TermMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bind `term` to `iri`; earlier bindings of either are dropped.
    pub fn set(&mut self, term: impl Into<String>, iri: impl Into<String>) -> &mut Self {
        let evicted = self.map.insert(term.into(), iri.into());
        for (term, iri) in evicted {
            trace!(%term, %iri, "term binding replaced");
        }
        self
    }

    /// IRI prefix for terms that have no binding of their own
    pub fn set_default(&mut self, iri: impl Into<String>) -> &mut Self {
        self.default = Some(iri.into());
        self
    }

    pub fn default_vocabulary(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.map.contains_left(term)
    }

    pub fn has_iri(&self, iri: &str) -> bool {
        self.map.contains_right(iri)
    }

    pub fn remove(&mut self, term: &str) -> Option<String> {
        self.map.remove_by_left(term)
    }

    /// The IRI bound to `term`, else the default vocabulary followed by `term`
    pub fn resolve(&self, term: &str) -> Option<String> {
        if let Some(iri) = self.map.get_by_left(term) {
            return Some(iri.clone());
        }
        self.default.as_ref().map(|vocab| format!("{}{}", vocab, term))
    }

    /// The term bound to exactly `iri`, or `iri` unchanged
    pub fn shrink(&self, iri: &str) -> String {
        match self.map.get_by_right(iri) {
            Some(term) => term.clone(),
            None => iri.to_string(),
        }
    }

    /// Import every binding of `other`.
    ///
    /// Without `overwrite`, a pair is skipped if its term or its IRI is already
    /// bound here.
    pub fn add_all<I, K, V>(&mut self, other: I, overwrite: bool) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (term, iri) in other {
            let (term, iri) = (term.into(), iri.into());
            if overwrite || !self.map.has_either(term.as_str(), iri.as_str()) {
                self.set(term, iri);
            }
        }
        self
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.lefts().map(String::as_str)
    }

    pub fn iris(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.rights().map(String::as_str)
    }

    /// `(term, iri)` pairs ordered by term
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|(t, iri)| (t.as_str(), iri.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TermMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tm = TermMap::new();
        for (term, iri) in iter {
            tm.set(term, iri);
        }
        tm
    }
}

impl<'a> IntoIterator for &'a TermMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl From<BTreeMap<String, String>> for TermMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<TermMap> for BTreeMap<String, String> {
    fn from(tm: TermMap) -> Self {
        tm.map.iter().map(|(t, iri)| (t.clone(), iri.clone())).collect()
    }
}
