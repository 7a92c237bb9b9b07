//! Hashing primitives for the Tamper-Evident Ledger.
//!
//! Provides deterministic canonicalization of record content and the
//! domain-separated SHA-256 link digest that binds each record to its
//! predecessor.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod canonical;
pub mod digest;

pub use canonical::{canonicalize, CanonicalError};
pub use digest::LinkDigest;
