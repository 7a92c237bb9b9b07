use std::collections::BTreeMap;
use std::sync::RwLock;

use tel_types::{Record, StreamId, TailRef};

use crate::error::{StoreError, StoreResult};
use crate::traits::LedgerStore;

/// In-memory store for tests, local demos, and embedding.
///
/// Records live in a per-stream `BTreeMap` keyed by sequence number, so
/// range reads come back ordered for free. A single `RwLock` guards the
/// whole map; per-stream append serialization is the chain manager's job,
/// not the store's.
#[derive(Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<BTreeMap<StreamId, BTreeMap<u64, Record>>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn read_tail(&self, stream: &StreamId) -> StoreResult<Option<TailRef>> {
        let state = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;

        Ok(state.get(stream).and_then(|records| {
            records.last_key_value().map(|(seq, record)| TailRef {
                seq: *seq,
                content_hash: record.content_hash,
            })
        }))
    }

    fn insert(&self, record: &Record) -> StoreResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;

        let records = state.entry(record.stream.clone()).or_default();
        if records.contains_key(&record.seq) {
            return Err(StoreError::SequenceConflict {
                stream: record.stream.clone(),
                seq: record.seq,
            });
        }
        records.insert(record.seq, record.clone());
        Ok(())
    }

    fn read_range(
        &self,
        stream: &StreamId,
        from: u64,
        to: Option<u64>,
    ) -> StoreResult<Vec<Record>> {
        if from == 0 || to.is_some_and(|to| to < from) {
            return Err(StoreError::InvalidRange {
                from,
                to: to.unwrap_or(0),
            });
        }

        let state = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;

        let Some(records) = state.get(stream) else {
            return Ok(vec![]);
        };

        let upper = to.unwrap_or(u64::MAX);
        Ok(records
            .range(from..=upper)
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn streams(&self) -> StoreResult<Vec<StreamId>> {
        let state = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;

        Ok(state.keys().cloned().collect())
    }

    fn record_count(&self, stream: &StreamId) -> StoreResult<u64> {
        let state = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;

        Ok(state.get(stream).map(|r| r.len() as u64).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tel_types::{ChainHash, ContentFields, FieldValue, StreamKind};

    use super::*;

    fn record(stream: &StreamId, seq: u64) -> Record {
        Record {
            stream: stream.clone(),
            seq,
            actor: "tester".into(),
            timestamp: Utc::now(),
            content: ContentFields::new().with("seq", FieldValue::Int(seq as i64)),
            prev_hash: ChainHash::GENESIS,
            content_hash: ChainHash::from_digest([seq as u8; 32]),
        }
    }

    #[test]
    fn tail_of_empty_stream_is_none() {
        let store = InMemoryLedgerStore::new();
        let stream = StreamId::singleton(StreamKind::SystemAudit);
        assert_eq!(store.read_tail(&stream).unwrap(), None);
    }

    #[test]
    fn tail_tracks_newest_record() {
        let store = InMemoryLedgerStore::new();
        let stream = StreamId::singleton(StreamKind::SystemAudit);
        store.insert(&record(&stream, 1)).unwrap();
        store.insert(&record(&stream, 2)).unwrap();

        let tail = store.read_tail(&stream).unwrap().unwrap();
        assert_eq!(tail.seq, 2);
        assert_eq!(tail.content_hash, ChainHash::from_digest([2; 32]));
    }

    #[test]
    fn duplicate_insert_is_a_sequence_conflict() {
        let store = InMemoryLedgerStore::new();
        let stream = StreamId::singleton(StreamKind::Signatures);
        store.insert(&record(&stream, 1)).unwrap();

        let err = store.insert(&record(&stream, 1)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::SequenceConflict { seq: 1, .. }
        ));

        // The original record must survive the failed insert.
        assert_eq!(store.record_count(&stream).unwrap(), 1);
    }

    #[test]
    fn read_range_is_inclusive_and_ordered() {
        let store = InMemoryLedgerStore::new();
        let stream = StreamId::keyed(StreamKind::RequestHistory, "REQ-1");
        for seq in 1..=5 {
            store.insert(&record(&stream, seq)).unwrap();
        }

        let middle = store.read_range(&stream, 2, Some(4)).unwrap();
        let seqs: Vec<_> = middle.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![2, 3, 4]);

        let open_ended = store.read_range(&stream, 3, None).unwrap();
        assert_eq!(open_ended.len(), 3);
    }

    #[test]
    fn read_range_rejects_malformed_bounds() {
        let store = InMemoryLedgerStore::new();
        let stream = StreamId::singleton(StreamKind::SystemAudit);

        assert!(matches!(
            store.read_range(&stream, 0, None).unwrap_err(),
            StoreError::InvalidRange { .. }
        ));
        assert!(matches!(
            store.read_range(&stream, 3, Some(2)).unwrap_err(),
            StoreError::InvalidRange { from: 3, to: 2 }
        ));
    }

    #[test]
    fn read_range_on_unknown_stream_is_empty() {
        let store = InMemoryLedgerStore::new();
        let stream = StreamId::keyed(StreamKind::LegalHold, "H-404");
        assert!(store.read_range(&stream, 1, None).unwrap().is_empty());
    }

    #[test]
    fn streams_lists_populated_streams() {
        let store = InMemoryLedgerStore::new();
        let a = StreamId::singleton(StreamKind::SystemAudit);
        let b = StreamId::keyed(StreamKind::RequestHistory, "REQ-2");
        store.insert(&record(&a, 1)).unwrap();
        store.insert(&record(&b, 1)).unwrap();

        let streams = store.streams().unwrap();
        assert_eq!(streams.len(), 2);
        assert!(streams.contains(&a));
        assert!(streams.contains(&b));
    }

    #[test]
    fn record_count_per_stream() {
        let store = InMemoryLedgerStore::new();
        let stream = StreamId::singleton(StreamKind::Signatures);
        assert_eq!(store.record_count(&stream).unwrap(), 0);
        store.insert(&record(&stream, 1)).unwrap();
        assert_eq!(store.record_count(&stream).unwrap(), 1);
    }
}
