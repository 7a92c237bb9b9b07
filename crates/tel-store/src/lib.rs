//! Storage boundary for the Tamper-Evident Ledger.
//!
//! The store is a dumb, durable append target keyed by `(stream, seq)`. It
//! performs no hashing and no chain validation — that is the chain manager's
//! and verifier's business — but it must never overwrite: an insert into an
//! occupied slot fails with [`StoreError::SequenceConflict`].
//!
//! # Design Rules
//!
//! 1. Records are immutable once inserted; there is no update or delete.
//! 2. Inserts are atomic: a reader sees a committed record or nothing.
//! 3. Concurrent reads are always safe.
//! 4. All I/O errors are propagated, never silently ignored.
//!
//! Production deployments back this trait with the application's encrypted
//! transactional database; [`InMemoryLedgerStore`] serves tests and
//! embedding.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryLedgerStore;
pub use traits::LedgerStore;
