use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::ContentFields;
use crate::hash::ChainHash;
use crate::stream::StreamId;

/// One immutable, hash-linked entry in a stream.
///
/// A record is created only by the append protocol and never mutated
/// afterward. Revoking or lifting a domain concept (a signature, a legal
/// hold) is expressed by appending a new record, never by touching an old
/// one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Owning stream.
    pub stream: StreamId,
    /// 1-based position within the stream; contiguous, no gaps.
    pub seq: u64,
    /// Opaque actor identity supplied by the identity collaborator.
    pub actor: String,
    /// Capture time; part of the canonicalized (hashed) content.
    pub timestamp: DateTime<Utc>,
    /// Ordered domain fields; opaque to the ledger core.
    pub content: ContentFields,
    /// `ChainHash::GENESIS` for seq 1, else the predecessor's `content_hash`.
    pub prev_hash: ChainHash,
    /// Digest of this record's canonical content bound to `prev_hash`.
    pub content_hash: ChainHash,
}

/// Append acknowledgement handed back to the calling workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub stream: StreamId,
    pub seq: u64,
    pub content_hash: ChainHash,
}

impl From<&Record> for Receipt {
    fn from(record: &Record) -> Self {
        Self {
            stream: record.stream.clone(),
            seq: record.seq,
            content_hash: record.content_hash,
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} [{}]",
            self.stream,
            self.seq,
            self.content_hash.short_hex()
        )
    }
}

/// Position and hash of a stream's newest record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailRef {
    pub seq: u64,
    pub content_hash: ChainHash,
}

#[cfg(test)]
mod tests {
    use crate::field::FieldValue;
    use crate::stream::StreamKind;

    use super::*;

    fn record() -> Record {
        Record {
            stream: StreamId::singleton(StreamKind::SystemAudit),
            seq: 3,
            actor: "auditor@site-01".into(),
            timestamp: Utc::now(),
            content: ContentFields::new().with("event", FieldValue::Text("LOGIN".into())),
            prev_hash: ChainHash::from_digest([1; 32]),
            content_hash: ChainHash::from_digest([2; 32]),
        }
    }

    #[test]
    fn receipt_mirrors_record_position() {
        let rec = record();
        let receipt = Receipt::from(&rec);
        assert_eq!(receipt.stream, rec.stream);
        assert_eq!(receipt.seq, 3);
        assert_eq!(receipt.content_hash, rec.content_hash);
    }

    #[test]
    fn receipt_display() {
        let receipt = Receipt::from(&record());
        let display = format!("{receipt}");
        assert!(display.contains("system_audit#3"));
        assert!(display.contains("02020202"));
    }

    #[test]
    fn serde_roundtrip() {
        let rec = record();
        let json = serde_json::to_string(&rec).unwrap();
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, parsed);
    }
}
