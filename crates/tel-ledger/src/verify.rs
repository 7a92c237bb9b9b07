use std::fmt;

use serde::{Deserialize, Serialize};
use tel_crypto::{canonicalize, LinkDigest};
use tel_store::LedgerStore;
use tel_types::{ChainHash, Record, StreamId};
use tracing::warn;

use crate::error::LedgerError;

/// Category of a detected chain break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    /// The stream's first record does not carry the genesis sentinel.
    MissingGenesis,
    /// A sequence number is missing — a record was deleted.
    SequenceGap,
    /// A record's stored `prev_hash` does not match its predecessor
    /// (or the caller-supplied trust boundary).
    LinkMismatch,
    /// A record's stored `content_hash` does not match the hash recomputed
    /// from its stored content — the record itself was altered.
    HashMismatch,
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGenesis => write!(f, "missing genesis"),
            Self::SequenceGap => write!(f, "sequence gap"),
            Self::LinkMismatch => write!(f, "link mismatch"),
            Self::HashMismatch => write!(f, "hash mismatch"),
        }
    }
}

/// First point of divergence found in a stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainBreak {
    /// Sequence number where the chain diverges. For a gap this is the
    /// missing sequence number, not an existing record's.
    pub seq: u64,
    pub kind: BreakKind,
    pub detail: String,
}

/// Outcome of one verification pass.
///
/// A break is a reportable fact about history, not an error: verification
/// returns `Ok` with `valid = false` and never mutates or "repairs" the
/// stored records. Compliance callers must treat `valid = false` as a hard
/// stop requiring manual investigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub stream: StreamId,
    pub valid: bool,
    /// Records that passed all checks before scanning stopped.
    pub records_checked: u64,
    pub first_break: Option<ChainBreak>,
}

impl IntegrityReport {
    /// Sequence number of the first break, if any.
    pub fn first_break_seq(&self) -> Option<u64> {
        self.first_break.as_ref().map(|b| b.seq)
    }
}

/// Read-only replay of a stream against its own hashes.
pub struct Verifier;

impl Verifier {
    /// Verify a whole stream from genesis.
    ///
    /// A stream with no records yields a valid report with zero records
    /// checked — absence of history is not a finding.
    pub fn verify<S: LedgerStore>(
        store: &S,
        stream: &StreamId,
    ) -> Result<IntegrityReport, LedgerError> {
        Self::verify_range(store, stream, 1, None, None)
    }

    /// Verify records with `from <= seq <= to` (`to = None` means through
    /// the tail).
    ///
    /// When `from > 1` the caller may supply `trust_hash`, the known-good
    /// `content_hash` of record `from - 1`; the first record in range is
    /// then checked against it. Without a trust hash the first record's
    /// linkage is taken on faith and only its own content hash is checked.
    ///
    /// Every record's `content_hash` is recomputed from stored content, so
    /// in-place tampering is caught even when the stored linkage fields
    /// are internally consistent. Scanning stops at the first break.
    pub fn verify_range<S: LedgerStore>(
        store: &S,
        stream: &StreamId,
        from: u64,
        to: Option<u64>,
        trust_hash: Option<ChainHash>,
    ) -> Result<IntegrityReport, LedgerError> {
        let records = store.read_range(stream, from, to)?;

        let mut checked = 0u64;
        let mut expected_seq = from;
        let mut expected_prev = if from == 1 {
            Some(ChainHash::GENESIS)
        } else {
            trust_hash
        };

        let mut first_break = None;
        for record in &records {
            if let Some(found) = check_record(record, expected_seq, expected_prev) {
                first_break = Some(found);
                break;
            }
            checked += 1;
            expected_seq += 1;
            expected_prev = Some(record.content_hash);
        }

        if let Some(chain_break) = &first_break {
            warn!(
                stream = %stream,
                seq = chain_break.seq,
                kind = %chain_break.kind,
                "chain break detected"
            );
        }

        Ok(IntegrityReport {
            stream: stream.clone(),
            valid: first_break.is_none(),
            records_checked: checked,
            first_break,
        })
    }
}

fn check_record(
    record: &Record,
    expected_seq: u64,
    expected_prev: Option<ChainHash>,
) -> Option<ChainBreak> {
    if record.seq != expected_seq {
        return Some(ChainBreak {
            seq: expected_seq,
            kind: BreakKind::SequenceGap,
            detail: format!("expected seq {expected_seq}, found {}", record.seq),
        });
    }

    if let Some(prev) = expected_prev {
        if record.prev_hash != prev {
            let kind = if record.seq == 1 {
                BreakKind::MissingGenesis
            } else {
                BreakKind::LinkMismatch
            };
            return Some(ChainBreak {
                seq: record.seq,
                kind,
                detail: format!(
                    "prev_hash {} does not match expected {}",
                    record.prev_hash.short_hex(),
                    prev.short_hex()
                ),
            });
        }
    }

    // Recompute from stored content; comparing stored linkage fields to
    // each other alone cannot catch in-place content tampering.
    let recomputed = match canonicalize(&record.actor, &record.timestamp, &record.content) {
        Ok(canonical) => LinkDigest::RECORD.link(&canonical, &record.prev_hash),
        Err(err) => {
            return Some(ChainBreak {
                seq: record.seq,
                kind: BreakKind::HashMismatch,
                detail: format!("stored content no longer canonicalizable: {err}"),
            });
        }
    };
    if recomputed != record.content_hash {
        return Some(ChainBreak {
            seq: record.seq,
            kind: BreakKind::HashMismatch,
            detail: format!(
                "stored hash {} != recomputed {}",
                record.content_hash.short_hex(),
                recomputed.short_hex()
            ),
        });
    }

    None
}
