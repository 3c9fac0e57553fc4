//! Prefix to namespace IRI mapping

use crate::bimap::OneToOneMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// One-to-one map between CURIE prefixes and namespace IRIs
///
/// The empty prefix is the default namespace (`:local` CURIEs, Turtle `@base`
/// when read through the Turtle reader).
///
/// # Example
///
/// ```
/// use rdfi_profile::PrefixMap;
///
/// let mut pm = PrefixMap::new();
/// pm.set("foo", "http://foo.de/");
/// assert_eq!(pm.resolve("foo:bar").as_deref(), Some("http://foo.de/bar"));
/// assert_eq!(pm.shrink("http://foo.de/bar"), "foo:bar");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct PrefixMap {
    map: OneToOneMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding the `owl`, `rdf`, `rdfs` and `xsd` prefixes
    pub fn with_builtins() -> Self {
        rdfi_vocab::prefixes::BUILTIN.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bind `prefix` to `namespace`; earlier bindings of either are dropped.
    pub fn set(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> &mut Self {
        let evicted = self.map.insert(prefix.into(), namespace.into());
        for (prefix, namespace) in evicted {
            trace!(%prefix, %namespace, "prefix binding replaced");
        }
        self
    }

    /// Bind the empty prefix
    pub fn set_default(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.set("", namespace)
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.map.contains_left(prefix)
    }

    pub fn has_iri(&self, namespace: &str) -> bool {
        self.map.contains_right(namespace)
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.map.get_by_left(prefix).map(String::as_str)
    }

    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.map.get_by_right(namespace).map(String::as_str)
    }

    /// Drop `prefix` and its namespace; returns the namespace
    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        self.map.remove_by_left(prefix)
    }

    /// Expand `prefix:local` to an IRI.
    ///
    /// Returns `None` if `curie` has no colon or its prefix is unknown.
    pub fn resolve(&self, curie: &str) -> Option<String> {
        let (prefix, local) = curie.split_once(':')?;
        self.namespace(prefix).map(|ns| format!("{}{}", ns, local))
    }

    /// Split `iri` into a registered prefix and the remaining local part.
    ///
    /// The namespace candidates are, in order: everything up to the last `#`,
    /// everything up to the last `/`, then the longest registered namespace
    /// that `iri` starts with.
    pub fn split<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
        for sep in ['#', '/'] {
            if let Some(idx) = iri.rfind(sep) {
                let (ns, local) = iri.split_at(idx + 1);
                if let Some(prefix) = self.prefix(ns) {
                    return Some((prefix, local));
                }
            }
        }

        self.map
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| (prefix.as_str(), &iri[ns.len()..]))
    }

    /// Compact `iri` to `prefix:local`, or return it unchanged
    pub fn shrink(&self, iri: &str) -> String {
        match self.split(iri) {
            Some((prefix, local)) => format!("{}:{}", prefix, local),
            None => iri.to_string(),
        }
    }

    /// Import every binding of `other`.
    ///
    /// Without `overwrite`, a pair is skipped if its prefix or its namespace is
    /// already bound here.
    pub fn add_all<I, K, V>(&mut self, other: I, overwrite: bool) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (prefix, namespace) in other {
            let (prefix, namespace) = (prefix.into(), namespace.into());
            if overwrite || !self.map.has_either(prefix.as_str(), namespace.as_str()) {
                self.set(prefix, namespace);
            }
        }
        self
    }

    /// Prefixes in sorted order
    pub fn prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.lefts().map(String::as_str)
    }

    /// Namespace IRIs in sorted order
    pub fn iris(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.rights().map(String::as_str)
    }

    /// `(prefix, namespace)` pairs ordered by prefix
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PrefixMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut pm = PrefixMap::new();
        for (prefix, namespace) in iter {
            pm.set(prefix, namespace);
        }
        pm
    }
}

impl<'a> IntoIterator for &'a PrefixMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl From<BTreeMap<String, String>> for PrefixMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<PrefixMap> for BTreeMap<String, String> {
    fn from(pm: PrefixMap) -> Self {
        pm.iter()
            .map(|(p, ns)| (p.to_string(), ns.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PrefixMap {
        [
            ("ex", "http://example.org/"),
            ("foo", "http://foo.de/"),
            ("bar", "http://bar.com#"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolve_requires_colon_and_known_prefix() {
        let pm = sample();
        assert_eq!(pm.resolve("foo:bar").as_deref(), Some("http://foo.de/bar"));
        assert_eq!(pm.resolve("foo:").as_deref(), Some("http://foo.de/"));
        assert_eq!(pm.resolve("foo:a:b").as_deref(), Some("http://foo.de/a:b"));
        assert_eq!(pm.resolve("foo"), None);
        assert_eq!(pm.resolve("nope:x"), None);
    }

    #[test]
    fn test_shrink_prefers_separator_split() {
        let mut pm = sample();
        pm.set("deep", "http://foo.de/a/");
        assert_eq!(pm.shrink("http://foo.de/a/b"), "deep:b");
        // No namespace ends at the last '/', so fall back to the longest match
        assert_eq!(pm.shrink("http://foo.de/a/b/c"), "deep:b/c");
        assert_eq!(pm.shrink("http://foo.de/x/y"), "foo:x/y");
    }

    #[test]
    fn test_shrink_unknown_iri_is_unchanged() {
        let pm = sample();
        assert_eq!(pm.shrink("urn:isbn:123"), "urn:isbn:123");
        assert_eq!(pm.split("urn:isbn:123"), None);
    }

    #[test]
    fn test_serde_as_plain_object() {
        let pm = sample();
        let json = serde_json::to_value(&pm).unwrap();
        assert_eq!(json["foo"], "http://foo.de/");
        let back: PrefixMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, pm);
    }

    #[test]
    fn test_builtins() {
        let pm = PrefixMap::with_builtins();
        assert_eq!(
            pm.shrink(rdfi_vocab::rdf::TYPE),
            "rdf:type"
        );
        assert!(pm.has_prefix("xsd"));
        assert!(pm.has_prefix("owl"));
    }
}
