//! Identifier sources for nodes and triples
//!
//! Every node and triple carries a process-unique id. Ids are handed out by
//! an [`IdSource`] that the caller owns and injects; there is no global
//! counter, so tests can use a [`SequentialIds`] source and get stable ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Produces fresh, never-repeating identifiers
pub trait IdSource: Send + Sync + fmt::Debug {
    fn next_id(&self) -> String;
}

/// Counter-backed ids of the form `{prefix}{n}`, starting at 0
#[derive(Debug, Default)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

/// Random v4 UUIDs, optionally prefixed
#[derive(Debug, Default)]
pub struct UuidIds {
    prefix: String,
}

impl UuidIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl IdSource for UuidIds {
    fn next_id(&self) -> String {
        format!("{}{}", self.prefix, Uuid::new_v4())
    }
}

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl AsRef<str>) -> Self {
                Self(Arc::from(id.as_ref()))
            }

            /// Draw a fresh id from `source`
            pub fn generate(source: &dyn IdSource) -> Self {
                Self(Arc::from(source.next_id()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

id_newtype!(
    /// Identity of a single node instance
    NodeId
);

id_newtype!(
    /// Identity of a single triple instance
    TripleId
);
