//! Combined prefix and term resolution

use crate::prefix_map::PrefixMap;
use crate::term_map::TermMap;
use rdfi_graph::{Node, Term};
use serde::{Deserialize, Serialize};

/// A [`PrefixMap`] and a [`TermMap`] resolved through one entry point
///
/// Tokens containing a colon are CURIEs and go to the prefix map; anything
/// else is a term.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    prefixes: PrefixMap,
    terms: TermMap,
}

impl Profile {
    pub fn new(prefixes: PrefixMap, terms: TermMap) -> Self {
        Self { prefixes, terms }
    }

    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut PrefixMap {
        &mut self.prefixes
    }

    pub fn terms(&self) -> &TermMap {
        &self.terms
    }

    pub fn terms_mut(&mut self) -> &mut TermMap {
        &mut self.terms
    }

    pub fn into_parts(self) -> (PrefixMap, TermMap) {
        (self.prefixes, self.terms)
    }

    /// Resolve a CURIE or a term to an IRI
    pub fn resolve(&self, token: &str) -> Option<String> {
        if token.contains(':') {
            self.prefixes.resolve(token)
        } else {
            self.terms.resolve(token)
        }
    }

    pub fn set_default_vocabulary(&mut self, iri: impl Into<String>) -> &mut Self {
        self.terms.set_default(iri);
        self
    }

    /// Namespace for CURIEs with an empty prefix (`:local`)
    pub fn set_default_prefix(&mut self, iri: impl Into<String>) -> &mut Self {
        self.prefixes.set_default(iri);
        self
    }

    pub fn set_term(&mut self, term: impl Into<String>, iri: impl Into<String>) -> &mut Self {
        self.terms.set(term, iri);
        self
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> &mut Self {
        self.prefixes.set(prefix, iri);
        self
    }

    /// Import both maps of `other`.
    ///
    /// The default vocabulary is taken from `other` when this profile has
    /// none, or when `overwrite` is set.
    pub fn import_profile(&mut self, other: &Profile, overwrite: bool) -> &mut Self {
        self.prefixes.add_all(&other.prefixes, overwrite);
        self.terms.add_all(&other.terms, overwrite);
        if let Some(vocab) = other.terms.default_vocabulary() {
            if overwrite || self.terms.default_vocabulary().is_none() {
                self.terms.set_default(vocab);
            }
        }
        self
    }

    /// Short display form of a node.
    ///
    /// Named nodes are shrunk through the prefix map and literal lexical
    /// forms through the term map. Blank nodes print their label.
    pub fn node_to_string(&self, node: &Node) -> String {
        match node.term() {
            Term::Named(iri) => self.prefixes.shrink(iri),
            Term::Literal(lit) => self.terms.shrink(lit.lexical()),
            Term::Blank(label) => label.to_string(),
        }
    }
}
