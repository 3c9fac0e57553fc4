//! RDF datatype representation
//!
//! Datatypes are always explicit on a literal: plain strings carry
//! `xsd:string` and language-tagged strings carry `rdf:langString`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Common XSD and RDF datatype IRIs (re-exported from vocab crate)
pub mod iri {
    pub use rdfi_vocab::rdf::LANG_STRING as RDF_LANG_STRING;
    pub use rdfi_vocab::xsd::{
        BOOLEAN as XSD_BOOLEAN, DATE as XSD_DATE, DATE_TIME as XSD_DATE_TIME,
        DECIMAL as XSD_DECIMAL, DOUBLE as XSD_DOUBLE, INTEGER as XSD_INTEGER,
        STRING as XSD_STRING,
    };
}

/// RDF literal datatype, held as its expanded IRI
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Self::from_iri(iri::XSD_STRING)
    }

    pub fn xsd_boolean() -> Self {
        Self::from_iri(iri::XSD_BOOLEAN)
    }

    pub fn xsd_integer() -> Self {
        Self::from_iri(iri::XSD_INTEGER)
    }

    pub fn xsd_decimal() -> Self {
        Self::from_iri(iri::XSD_DECIMAL)
    }

    pub fn xsd_double() -> Self {
        Self::from_iri(iri::XSD_DOUBLE)
    }

    pub fn xsd_date() -> Self {
        Self::from_iri(iri::XSD_DATE)
    }

    pub fn xsd_date_time() -> Self {
        Self::from_iri(iri::XSD_DATE_TIME)
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Self::from_iri(iri::RDF_LANG_STRING)
    }

    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check if this is the xsd:string datatype
    pub fn is_xsd_string(&self) -> bool {
        self.as_iri() == iri::XSD_STRING
    }

    /// Check if this is the rdf:langString datatype
    pub fn is_lang_string(&self) -> bool {
        self.as_iri() == iri::RDF_LANG_STRING
    }

    pub fn is_boolean(&self) -> bool {
        rdfi_vocab::xsd::is_boolean(self.as_iri())
    }

    /// Check if this is any XSD numeric type (integer family, decimal, float, double)
    pub fn is_numeric(&self) -> bool {
        rdfi_vocab::xsd::is_numeric_datatype(self.as_iri())
    }

    /// Check if literals of this type decode to a point in time
    pub fn is_temporal(&self) -> bool {
        rdfi_vocab::xsd::is_temporal(self.as_iri())
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_iri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_constructors() {
        assert_eq!(Datatype::xsd_string().as_iri(), iri::XSD_STRING);
        assert_eq!(Datatype::xsd_boolean().as_iri(), iri::XSD_BOOLEAN);
        assert_eq!(Datatype::xsd_integer().as_iri(), iri::XSD_INTEGER);
        assert_eq!(Datatype::rdf_lang_string().as_iri(), iri::RDF_LANG_STRING);
    }

    #[test]
    fn test_is_checks() {
        assert!(Datatype::xsd_string().is_xsd_string());
        assert!(!Datatype::xsd_integer().is_xsd_string());
        assert!(Datatype::rdf_lang_string().is_lang_string());

        assert!(Datatype::xsd_integer().is_numeric());
        assert!(Datatype::from_iri(rdfi_vocab::xsd::UNSIGNED_SHORT).is_numeric());
        assert!(!Datatype::xsd_string().is_numeric());

        assert!(Datatype::xsd_date().is_temporal());
        assert!(!Datatype::from_iri(rdfi_vocab::xsd::TIME).is_temporal());
    }

    #[test]
    fn test_serde_as_plain_iri() {
        let json = serde_json::to_string(&Datatype::xsd_integer()).unwrap();
        assert_eq!(json, format!("\"{}\"", iri::XSD_INTEGER));
        let back: Datatype = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Datatype::xsd_integer());
    }
}
