//! RDF term types: named node, blank node, and literal
//!
//! A [`Term`] is the value part of a node, without identity. Its
//! `PartialEq`/`Hash` implement RDF node equivalence, and every place in the
//! workspace that needs "same node" (graph dedup, accessor dedup, pattern
//! matching) goes through them.
//!
//! Two terms are equivalent iff they are the same variant with the same
//! nominal value; literals additionally need the same language tag and, when
//! untagged, the same datatype.

use crate::datatype::Datatype;
use crate::error::{GraphError, Result};
use crate::primitive::Primitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The variant of a node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    NamedNode,
    BlankNode,
    Literal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::NamedNode => "NamedNode",
            NodeKind::BlankNode => "BlankNode",
            NodeKind::Literal => "Literal",
        };
        f.write_str(name)
    }
}

/// An RDF literal: lexical form, datatype and optional language tag
///
/// # Invariants
///
/// - A literal with a language tag has datatype `rdf:langString`.
/// - A literal constructed without a datatype has `xsd:string`.
///
/// The decoded [`Primitive`] is computed once at construction.
#[derive(Clone, Debug)]
pub struct Literal {
    lexical: Arc<str>,
    datatype: Datatype,
    language: Option<Arc<str>>,
    value: Primitive,
}

impl Literal {
    /// Build a literal, validating the language/datatype combination.
    ///
    /// A language tag may only be combined with no datatype, `xsd:string` or
    /// `rdf:langString`; the result always carries `rdf:langString`.
    pub fn new(
        lexical: impl AsRef<str>,
        language: Option<&str>,
        datatype: Option<Datatype>,
    ) -> Result<Self> {
        let lexical: Arc<str> = Arc::from(lexical.as_ref());
        match language {
            Some(lang) => {
                if let Some(dt) = &datatype {
                    if !dt.is_xsd_string() && !dt.is_lang_string() {
                        return Err(GraphError::invalid(format!(
                            "literal with language tag @{} cannot have datatype <{}>",
                            lang, dt
                        )));
                    }
                }
                if !is_valid_language_tag(lang) {
                    return Err(GraphError::invalid(format!(
                        "malformed language tag: {:?}",
                        lang
                    )));
                }
                Ok(Self {
                    value: Primitive::Text(lexical.clone()),
                    lexical,
                    datatype: Datatype::rdf_lang_string(),
                    language: Some(Arc::from(lang)),
                })
            }
            None => {
                let datatype = datatype.unwrap_or_else(Datatype::xsd_string);
                if datatype.is_lang_string() {
                    return Err(GraphError::invalid(
                        "rdf:langString literal requires a language tag",
                    ));
                }
                Ok(Self {
                    value: Primitive::decode(&lexical, &datatype),
                    lexical,
                    datatype,
                    language: None,
                })
            }
        }
    }

    /// Plain `xsd:string` literal
    pub fn string(lexical: impl AsRef<str>) -> Self {
        let lexical: Arc<str> = Arc::from(lexical.as_ref());
        Self {
            value: Primitive::Text(lexical.clone()),
            lexical,
            datatype: Datatype::xsd_string(),
            language: None,
        }
    }

    /// Typed literal; fails only for `rdf:langString` without a tag
    pub fn typed(lexical: impl AsRef<str>, datatype: Datatype) -> Result<Self> {
        Self::new(lexical, None, Some(datatype))
    }

    /// Language-tagged literal
    pub fn lang(lexical: impl AsRef<str>, language: &str) -> Result<Self> {
        Self::new(lexical, Some(language), None)
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> &Datatype {
        &self.datatype
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The decoded native value
    pub fn value(&self) -> &Primitive {
        &self.value
    }
}

/// BCP 47 shape check: `alpha+ ("-" alnum+)*`
fn is_valid_language_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let primary_ok = parts
        .next()
        .is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphabetic()));
    primary_ok && parts.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()))
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        if self.lexical != other.lexical || self.language != other.language {
            return false;
        }
        // Tagged literals are rdf:langString by construction; datatype is not compared.
        self.language.is_some() || self.datatype == other.datatype
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lexical.hash(state);
        match &self.language {
            Some(lang) => lang.hash(state),
            None => self.datatype.hash(state),
        }
    }
}

/// An RDF term (subject, predicate, or object position)
#[derive(Clone, Debug)]
pub enum Term {
    /// IRI, stored as given (expanded or relative)
    Named(Arc<str>),

    /// Blank node label, without the `_:` prefix
    Blank(Arc<str>),

    Literal(Literal),
}

impl Term {
    pub fn named(iri: impl AsRef<str>) -> Self {
        Term::Named(Arc::from(iri.as_ref()))
    }

    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::Blank(Arc::from(label.as_ref()))
    }

    /// Plain string literal (xsd:string)
    pub fn string(value: impl AsRef<str>) -> Self {
        Term::Literal(Literal::string(value))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Term::Named(_) => NodeKind::NamedNode,
            Term::Blank(_) => NodeKind::BlankNode,
            Term::Literal(_) => NodeKind::Literal,
        }
    }

    /// The nominal value: IRI, blank label, or lexical form
    pub fn value(&self) -> &str {
        match self {
            Term::Named(iri) => iri,
            Term::Blank(label) => label,
            Term::Literal(lit) => lit.lexical(),
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Term::Named(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Named(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The comparable native value of this term
    pub fn primitive(&self) -> Primitive {
        match self {
            Term::Named(iri) => Primitive::Text(iri.clone()),
            Term::Blank(label) => Primitive::Text(label.clone()),
            Term::Literal(lit) => lit.value().clone(),
        }
    }

    /// Compare against a native value
    pub fn equals_value(&self, value: &Primitive) -> bool {
        match self {
            Term::Literal(lit) => lit.value() == value,
            Term::Named(s) | Term::Blank(s) => value.as_str() == Some(s.as_ref()),
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Named(a), Term::Named(b)) => a == b,
            (Term::Blank(a), Term::Blank(b)) => a == b,
            (Term::Literal(a), Term::Literal(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Term::Named(iri) => iri.hash(state),
            Term::Blank(label) => label.hash(state),
            Term::Literal(lit) => lit.hash(state),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::ntriples::write_term(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_literal_defaults_to_xsd_string() {
        let lit = Literal::new("hello", None, None).unwrap();
        assert!(lit.datatype().is_xsd_string());
        assert_eq!(lit.value(), &Primitive::text("hello"));
    }

    #[test]
    fn test_language_forces_lang_string() {
        let lit = Literal::new("bonjour", Some("fr"), None).unwrap();
        assert!(lit.datatype().is_lang_string());

        let explicit = Literal::new("bonjour", Some("fr"), Some(Datatype::xsd_string())).unwrap();
        assert!(explicit.datatype().is_lang_string());
        assert_eq!(lit, explicit);
    }

    #[test]
    fn test_language_with_foreign_datatype_is_rejected() {
        let err = Literal::new("1", Some("en"), Some(Datatype::xsd_integer())).unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn test_malformed_language_tag_is_rejected() {
        assert!(Literal::lang("x", "").is_err());
        assert!(Literal::lang("x", "en_US").is_err());
        assert!(Literal::lang("x", "en-US").is_ok());
    }

    #[test]
    fn test_lang_string_without_tag_is_rejected() {
        assert!(Literal::typed("x", Datatype::rdf_lang_string()).is_err());
    }

    #[test]
    fn test_equivalence() {
        assert_eq!(Term::named("n1"), Term::named("n1"));
        assert_ne!(Term::named("b1"), Term::blank("b1"));
        assert_ne!(Term::string("b1"), Term::blank("b1"));

        let one = Term::Literal(Literal::typed("1", Datatype::xsd_integer()).unwrap());
        let one_again = Term::Literal(Literal::typed("1", Datatype::xsd_integer()).unwrap());
        let zero_one = Term::Literal(Literal::typed("01", Datatype::xsd_integer()).unwrap());
        assert_eq!(one, one_again);
        // Same primitive, different lexical form
        assert_ne!(one, zero_one);
        assert_ne!(one, Term::string("1"));
    }

    #[test]
    fn test_hash_agrees_with_equivalence() {
        let mut set = HashSet::new();
        set.insert(Term::named("n1"));
        set.insert(Term::named("n1"));
        set.insert(Term::blank("n1"));
        set.insert(Term::string("n1"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_equals_value() {
        assert!(Term::named("b1").equals_value(&Primitive::text("b1")));
        assert!(Term::blank("b1").equals_value(&Primitive::text("b1")));

        let one = Term::Literal(Literal::typed("1", Datatype::xsd_integer()).unwrap());
        assert!(one.equals_value(&Primitive::from(1)));
        assert!(!one.equals_value(&Primitive::text("1")));

        let tagged = Term::Literal(Literal::lang("1", "en").unwrap());
        assert!(tagged.equals_value(&Primitive::text("1")));
    }
}
