//! Environment configuration.
//!
//! ```json
//! {
//!   "idScheme": "uuid",
//!   "idPrefix": "urn:x-rdfi:",
//!   "defaultVocabulary": "http://schema.org/",
//!   "prefixes": { "ex": "http://example.org/" },
//!   "terms": { "name": "http://xmlns.com/foaf/0.1/name" }
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use rdfi_graph::{IdSource, NodeFactory, SequentialIds, UuidIds};
use rdfi_profile::{PrefixMap, Profile, TermMap};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::environment::RdfEnvironment;
use crate::error::Result;

/// How node and triple ids are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// `{prefix}0`, `{prefix}1`, ...
    #[default]
    Sequential,
    /// `{prefix}{uuid v4}`
    Uuid,
}

/// Settings for building an [`RdfEnvironment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub id_scheme: IdScheme,
    pub id_prefix: Option<String>,

    /// Namespace for bare terms with no explicit mapping
    pub default_vocabulary: Option<String>,

    /// Namespace bound to the empty prefix (`:local`)
    pub default_prefix: Option<String>,

    /// Added on top of the built-in prefixes, replacing them on conflict
    pub prefixes: BTreeMap<String, String>,

    pub terms: BTreeMap<String, String>,
}

impl EnvironmentConfig {
    /// Decode a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn id_source(&self) -> Arc<dyn IdSource> {
        let prefix = self.id_prefix.clone().unwrap_or_default();
        match self.id_scheme {
            IdScheme::Sequential => Arc::new(SequentialIds::new(prefix)),
            IdScheme::Uuid => Arc::new(UuidIds::new(prefix)),
        }
    }

    pub fn build(&self) -> RdfEnvironment {
        let mut prefixes = PrefixMap::with_builtins();
        prefixes.add_all(&self.prefixes, true);
        if let Some(ns) = &self.default_prefix {
            prefixes.set_default(ns.clone());
        }

        let mut terms: TermMap = self.terms.iter().collect();
        if let Some(vocab) = &self.default_vocabulary {
            terms.set_default(vocab.clone());
        }

        debug!(
            id_scheme = ?self.id_scheme,
            prefixes = prefixes.len(),
            terms = terms.len(),
            "environment configured"
        );
        RdfEnvironment::with_parts(
            Profile::new(prefixes, terms),
            NodeFactory::new(self.id_source()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_json("{}").unwrap();
        assert_eq!(config, EnvironmentConfig::default());
        assert_eq!(config.id_scheme, IdScheme::Sequential);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        assert!(EnvironmentConfig::from_json(r#"{"idScheme": "random"}"#).is_err());
    }

    #[test]
    fn test_id_sources() {
        let seq = EnvironmentConfig {
            id_prefix: Some("n".into()),
            ..Default::default()
        };
        let ids = seq.id_source();
        assert_eq!(ids.next_id(), "n0");
        assert_eq!(ids.next_id(), "n1");

        let uuid = EnvironmentConfig {
            id_scheme: IdScheme::Uuid,
            ..Default::default()
        };
        let ids = uuid.id_source();
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
