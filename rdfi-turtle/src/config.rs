//! Reader and writer configuration.
//!
//! Both structs load from JSON with camelCase keys; missing keys take the
//! defaults below.

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::TurtleReader`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderConfig {
    /// Base IRI in scope before any `@base` directive.
    pub base: Option<String>,

    /// Reject relative IRIs that have no base to resolve against.
    /// Default: false (such IRIs are kept verbatim)
    pub strict_iris: bool,
}

impl ReaderConfig {
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict_iris = true;
        self
    }
}

/// Configuration for [`crate::TurtleWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterConfig {
    /// Spaces before continuation lines of a subject block.
    /// Default: 4
    pub indent: usize,

    /// Write `@prefix` lines for the profile's prefixes.
    pub emit_prefixes: bool,

    /// Only declare prefixes that the body actually uses.
    pub only_used_prefixes: bool,

    /// Write named nodes as `prefix:local` where possible.
    pub shrink_iris: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            emit_prefixes: true,
            only_used_prefixes: true,
            shrink_iris: true,
        }
    }
}
