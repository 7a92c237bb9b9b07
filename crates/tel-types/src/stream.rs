use std::fmt;

use serde::{Deserialize, Serialize};

/// Compliance subsystem that owns a family of streams.
///
/// Singleton kinds have exactly one stream; per-entity kinds have one
/// independent stream per entity key (e.g., one chain per DSAR request).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StreamKind {
    /// Global system/security audit log (singleton).
    SystemAudit,
    /// Electronic signature events (singleton).
    Signatures,
    /// Per-request DSAR history (keyed by request id).
    RequestHistory,
    /// Legal hold events (keyed by hold id).
    LegalHold,
}

impl StreamKind {
    /// Stable lowercase name used in stream identifiers and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemAudit => "system_audit",
            Self::Signatures => "signatures",
            Self::RequestHistory => "request_history",
            Self::LegalHold => "legal_hold",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical identity of one independent hash-chained stream.
///
/// A stream is `(kind, key)`. The key is `None` for singleton streams and
/// an opaque entity identifier for per-entity streams. Two distinct
/// `StreamId`s own fully independent chains with no cross-stream ordering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StreamId {
    pub kind: StreamKind,
    pub key: Option<String>,
}

impl StreamId {
    /// Identify the single global stream of a kind.
    pub fn singleton(kind: StreamKind) -> Self {
        Self { kind, key: None }
    }

    /// Identify the per-entity stream of a kind.
    pub fn keyed(kind: StreamKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: Some(key.into()),
        }
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}/{}", self.kind, key),
            None => write!(f, "{}", self.kind),
        }
    }
}
