//! Core chain logic for the Tamper-Evident Ledger (TEL).
//!
//! This crate is the heart of TEL. It provides:
//! - The append protocol: per-stream exclusive locking, tail linkage, and
//!   atomic persistence ([`ChainManager`])
//! - Read-only verification that replays a stream against its own hashes
//!   and reports the first point of divergence ([`Verifier`])
//! - Lazy, race-free per-stream lock and tail-cache state ([`StreamRegistry`])
//! - Filtered history reads for reporting and export ([`HistoryFilter`])
//! - The [`Ledger`] facade that compliance workflows call
//!
//! One generic chain manager serves every compliance stream — the global
//! audit log, signature events, per-request DSAR history, legal holds —
//! instead of one hand-written copy of the pattern per subsystem.

pub mod chain;
pub mod error;
pub mod history;
pub mod registry;
pub mod verify;

pub use chain::ChainManager;
pub use error::LedgerError;
pub use history::{history, HistoryFilter};
pub use registry::StreamRegistry;
pub use verify::{BreakKind, ChainBreak, IntegrityReport, Verifier};

use std::sync::Arc;
use std::time::Duration;

use tel_store::{InMemoryLedgerStore, LedgerStore};
use tel_types::{ChainHash, ContentFields, Receipt, Record, StreamId};

/// The ledger surface exposed to domain collaborators.
///
/// Owns one chain manager over one storage collaborator. Appends are
/// serialized per stream; verification and history reads go straight to
/// the store and never contend with the append lock.
pub struct Ledger<S = InMemoryLedgerStore> {
    store: Arc<S>,
    chain: ChainManager<S>,
}

impl Ledger<InMemoryLedgerStore> {
    /// Ledger over a fresh in-memory store, for tests and embedding.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryLedgerStore::new()))
    }
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            chain: ChainManager::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn with_lock_timeout(store: Arc<S>, lock_timeout: Duration) -> Self {
        Self {
            chain: ChainManager::with_lock_timeout(Arc::clone(&store), lock_timeout),
            store,
        }
    }

    /// Append one record on behalf of `actor` and return its receipt.
    pub fn append(
        &self,
        stream: StreamId,
        actor: &str,
        content: ContentFields,
    ) -> Result<Receipt, LedgerError> {
        self.chain.append(stream, actor, content)
    }

    /// Verify a whole stream from genesis.
    pub fn verify(&self, stream: &StreamId) -> Result<IntegrityReport, LedgerError> {
        Verifier::verify(self.store.as_ref(), stream)
    }

    /// Verify a sub-range, optionally seeded with the known-good hash of
    /// the record preceding `from`.
    pub fn verify_range(
        &self,
        stream: &StreamId,
        from: u64,
        to: Option<u64>,
        trust_hash: Option<ChainHash>,
    ) -> Result<IntegrityReport, LedgerError> {
        Verifier::verify_range(self.store.as_ref(), stream, from, to, trust_hash)
    }

    /// Read a stream's records, narrowed by the filter.
    pub fn history(
        &self,
        stream: &StreamId,
        filter: &HistoryFilter,
    ) -> Result<Vec<Record>, LedgerError> {
        history(self.store.as_ref(), stream, filter)
    }

    /// All streams holding at least one record.
    pub fn streams(&self) -> Result<Vec<StreamId>, LedgerError> {
        Ok(self.store.streams()?)
    }

    /// Number of records in a stream.
    pub fn record_count(&self, stream: &StreamId) -> Result<u64, LedgerError> {
        Ok(self.store.record_count(stream)?)
    }

    /// The storage collaborator backing this ledger.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use tel_types::{FieldValue, StreamKind};

    use super::*;

    fn event(name: &str) -> ContentFields {
        ContentFields::new().with("event", FieldValue::Text(name.into()))
    }

    #[test]
    fn create_then_approve_then_verify() {
        let ledger = Ledger::in_memory();
        let stream = StreamId::singleton(StreamKind::SystemAudit);

        let a1 = ledger.append(stream.clone(), "alice", event("CREATE")).unwrap();
        let a2 = ledger.append(stream.clone(), "bob", event("APPROVE")).unwrap();

        let records = ledger.history(&stream, &HistoryFilter::new()).unwrap();
        assert_eq!(records[0].prev_hash, ChainHash::GENESIS);
        assert_eq!(records[1].prev_hash, a1.content_hash);
        assert_eq!(records[1].content_hash, a2.content_hash);

        let report = ledger.verify(&stream).unwrap();
        assert!(report.valid);
        assert_eq!(report.records_checked, 2);
    }

    #[test]
    fn one_ledger_carries_many_independent_streams() {
        let ledger = Ledger::in_memory();
        let audit = StreamId::singleton(StreamKind::SystemAudit);
        let signatures = StreamId::singleton(StreamKind::Signatures);
        let request = StreamId::keyed(StreamKind::RequestHistory, "REQ-9");

        ledger.append(audit.clone(), "alice", event("LOGIN")).unwrap();
        ledger.append(signatures.clone(), "alice", event("SIGN")).unwrap();
        ledger.append(request.clone(), "bob", event("OPEN")).unwrap();
        ledger.append(request.clone(), "bob", event("FULFILL")).unwrap();

        assert_eq!(ledger.streams().unwrap().len(), 3);
        assert_eq!(ledger.record_count(&request).unwrap(), 2);
        for stream in [&audit, &signatures, &request] {
            assert!(ledger.verify(stream).unwrap().valid);
        }
    }

    #[test]
    fn lifting_a_hold_is_a_new_record_not_a_mutation() {
        let ledger = Ledger::in_memory();
        let hold = StreamId::keyed(StreamKind::LegalHold, "H-17");

        ledger
            .append(
                hold.clone(),
                "counsel",
                event("PLACED").with("scope", FieldValue::Text("site-01".into())),
            )
            .unwrap();
        let lifted = ledger.append(hold.clone(), "counsel", event("LIFTED")).unwrap();

        assert_eq!(lifted.seq, 2);
        let records = ledger.history(&hold, &HistoryFilter::new()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(ledger.verify(&hold).unwrap().valid);
    }

    #[test]
    fn verify_range_through_the_facade() {
        let ledger = Ledger::in_memory();
        let stream = StreamId::singleton(StreamKind::SystemAudit);
        for i in 0..4 {
            ledger
                .append(stream.clone(), "alice", event(&format!("E{i}")))
                .unwrap();
        }

        let records = ledger.history(&stream, &HistoryFilter::new()).unwrap();
        let report = ledger
            .verify_range(&stream, 3, None, Some(records[1].content_hash))
            .unwrap();
        assert!(report.valid);
        assert_eq!(report.records_checked, 2);
    }
}
