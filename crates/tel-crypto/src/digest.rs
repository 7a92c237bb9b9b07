use sha2::{Digest, Sha256};
use tel_types::ChainHash;

/// Domain-separated SHA-256 link digest.
///
/// Each digest carries a domain tag (e.g., `"tel-record-v1"`) that is
/// prepended to every computation, so byte-identical payloads hashed under
/// different domains never collide. [`LinkDigest::link`] additionally folds
/// the previous record's hash into the input — the parent hash is hashed,
/// not merely stored alongside, which is what binds a record to its
/// position in the chain.
pub struct LinkDigest {
    domain: &'static str,
}

impl LinkDigest {
    /// Digest for ledger records.
    pub const RECORD: Self = Self {
        domain: "tel-record-v1",
    };

    /// Create a digest with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Compute a record's `content_hash` from its canonical bytes and the
    /// predecessor's hash (`ChainHash::GENESIS` for a stream's first record).
    pub fn link(&self, canonical: &[u8], prev_hash: &ChainHash) -> ChainHash {
        let mut hasher = Sha256::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(canonical);
        hasher.update(prev_hash.as_bytes());
        ChainHash::from_digest(hasher.finalize().into())
    }

    /// Hash raw bytes with domain separation (no chain linkage).
    pub fn hash(&self, data: &[u8]) -> ChainHash {
        let mut hasher = Sha256::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ChainHash::from_digest(hasher.finalize().into())
    }

    /// The domain tag used by this digest.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
