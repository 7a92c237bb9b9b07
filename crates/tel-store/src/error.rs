use tel_types::StreamId;

/// Errors from ledger store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record already occupies `(stream, seq)`. The store never
    /// overwrites; the caller must treat this as an integrity signal,
    /// not retry fodder.
    #[error("sequence conflict: {stream} already holds a record at seq {seq}")]
    SequenceConflict { stream: StreamId, seq: u64 },

    /// The requested range is malformed (zero or inverted bounds).
    #[error("invalid sequence range: from={from}, to={to}")]
    InvalidRange { from: u64, to: u64 },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend is unreachable or refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
