//! Foundation types for the Tamper-Evident Ledger (TEL).
//!
//! This crate provides the core identity, content, and linkage types used
//! throughout the TEL system. Every other TEL crate depends on `tel-types`.
//!
//! # Key Types
//!
//! - [`StreamId`] — Logical identity of one independent hash chain
//! - [`ChainHash`] — 256-bit link digest, with the [`ChainHash::GENESIS`] sentinel
//! - [`FieldValue`] / [`ContentFields`] — Typed, ordered record content
//! - [`Record`] — One immutable, hash-linked ledger entry
//! - [`Receipt`] — Append acknowledgement returned to domain collaborators

pub mod error;
pub mod field;
pub mod hash;
pub mod record;
pub mod stream;

pub use error::TypeError;
pub use field::{ContentFields, Field, FieldValue};
pub use hash::ChainHash;
pub use record::{Receipt, Record, TailRef};
pub use stream::{StreamId, StreamKind};
