use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// 256-bit link digest binding a record to its position in a chain.
///
/// Every record stores two of these: its own `content_hash` and the
/// `prev_hash` of its predecessor. The first record of a stream carries
/// the [`ChainHash::GENESIS`] sentinel as its `prev_hash`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainHash([u8; 32]);

impl ChainHash {
    /// Sentinel `prev_hash` for the first record of a stream.
    pub const GENESIS: Self = Self([0u8; 32]);

    /// Wrap a pre-computed digest.
    pub const fn from_digest(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// Returns `true` if this is the genesis sentinel.
    pub fn is_genesis(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ChainHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_genesis() {
            write!(f, "ChainHash(GENESIS)")
        } else {
            write!(f, "ChainHash({})", self.short_hex())
        }
    }
}

impl fmt::Display for ChainHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for ChainHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<ChainHash> for [u8; 32] {
    fn from(hash: ChainHash) -> Self {
        hash.0
    }
}
