use std::time::Duration;

use tel_crypto::CanonicalError;
use tel_store::StoreError;
use tel_types::StreamId;

/// Errors produced by ledger operations.
///
/// A broken chain is deliberately absent here: verification findings are
/// returned as data in an `IntegrityReport`, never raised as an error,
/// because a tampered history is an expected real-world state that callers
/// must be able to inspect in full.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Record content cannot be canonicalized. Caller error; retrying
    /// without fixing the input cannot succeed.
    #[error("invalid content: {0}")]
    InvalidContent(#[from] CanonicalError),

    /// The per-stream append lock could not be acquired in time. Safe to
    /// retry with backoff.
    #[error("timed out acquiring append lock for {stream} after {waited:?}")]
    LockTimeout { stream: StreamId, waited: Duration },

    /// The store refused an insert into an occupied slot. Something wrote
    /// to the stream outside the append lock; surfaced as-is and never
    /// silently retried against a re-read tail.
    #[error("sequence conflict on {stream} at seq {seq}")]
    SequenceConflict { stream: StreamId, seq: u64 },

    /// Malformed sequence range passed to a read operation.
    #[error("invalid sequence range: from={from}, to={to}")]
    InvalidRange { from: u64, to: u64 },

    /// Storage backend failure, propagated unchanged.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl LedgerError {
    fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::SequenceConflict { stream, seq } => Self::SequenceConflict { stream, seq },
            StoreError::InvalidRange { from, to } => Self::InvalidRange { from, to },
            StoreError::Io(e) => Self::StorageUnavailable(e.to_string()),
            StoreError::Unavailable(reason) => Self::StorageUnavailable(reason),
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        Self::from_store(err)
    }
}
