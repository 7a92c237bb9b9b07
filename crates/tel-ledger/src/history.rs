use chrono::{DateTime, Utc};
use tel_store::LedgerStore;
use tel_types::{Record, StreamId};

use crate::error::LedgerError;

/// Narrowing criteria for history reads.
///
/// All criteria are conjunctive; an empty filter matches every record.
/// History is a read-only projection for reporting and export — it makes
/// no integrity claims about what it returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub actor: Option<String>,
    pub from_seq: Option<u64>,
    pub to_seq: Option<u64>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only records written by this actor.
    pub fn by_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Keep only records with `seq >= from`.
    pub fn from_seq(mut self, from: u64) -> Self {
        self.from_seq = Some(from);
        self
    }

    /// Keep only records with `seq <= to`.
    pub fn to_seq(mut self, to: u64) -> Self {
        self.to_seq = Some(to);
        self
    }

    /// Keep only records captured at or after this instant.
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Keep only records captured at or before this instant.
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    fn matches(&self, record: &Record) -> bool {
        if let Some(actor) = &self.actor {
            if record.actor != *actor {
                return false;
            }
        }
        if let Some(since) = &self.since {
            if record.timestamp < *since {
                return false;
            }
        }
        if let Some(until) = &self.until {
            if record.timestamp > *until {
                return false;
            }
        }
        true
    }
}

/// Read a stream's records in order, narrowed by the filter.
///
/// An unknown stream yields an empty history, not an error.
pub fn history<S: LedgerStore>(
    store: &S,
    stream: &StreamId,
    filter: &HistoryFilter,
) -> Result<Vec<Record>, LedgerError> {
    let from = filter.from_seq.unwrap_or(1);
    let records = store.read_range(stream, from, filter.to_seq)?;
    Ok(records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tel_store::InMemoryLedgerStore;
    use tel_types::{ContentFields, FieldValue, StreamKind};

    use crate::chain::ChainManager;

    use super::*;

    fn populated(stream: &StreamId) -> Arc<InMemoryLedgerStore> {
        let manager = ChainManager::new(Arc::new(InMemoryLedgerStore::new()));
        for (actor, event) in [
            ("alice", "CREATE"),
            ("bob", "REVIEW"),
            ("alice", "APPROVE"),
            ("carol", "EXPORT"),
        ] {
            manager
                .append(
                    stream.clone(),
                    actor,
                    ContentFields::new().with("event", FieldValue::Text(event.into())),
                )
                .unwrap();
        }
        Arc::clone(manager.store())
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let stream = StreamId::singleton(StreamKind::SystemAudit);
        let store = populated(&stream);

        let records = history(store.as_ref(), &stream, &HistoryFilter::new()).unwrap();
        let seqs: Vec<_> = records.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn actor_filter_narrows() {
        let stream = StreamId::singleton(StreamKind::SystemAudit);
        let store = populated(&stream);

        let records = history(
            store.as_ref(),
            &stream,
            &HistoryFilter::new().by_actor("alice"),
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.actor == "alice"));
    }

    #[test]
    fn sequence_window_narrows() {
        let stream = StreamId::singleton(StreamKind::SystemAudit);
        let store = populated(&stream);

        let records = history(
            store.as_ref(),
            &stream,
            &HistoryFilter::new().from_seq(2).to_seq(3),
        )
        .unwrap();
        let seqs: Vec<_> = records.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![2, 3]);
    }

    #[test]
    fn time_window_narrows() {
        let stream = StreamId::singleton(StreamKind::SystemAudit);
        let store = populated(&stream);
        let records = store.read_range(&stream, 1, None).unwrap();
        let cutoff = records[1].timestamp;

        let filtered = history(
            store.as_ref(),
            &stream,
            &HistoryFilter::new().since(cutoff),
        )
        .unwrap();
        assert!(filtered.iter().all(|r| r.timestamp >= cutoff));
        assert!(filtered.iter().any(|r| r.seq == 2));
    }

    #[test]
    fn unknown_stream_yields_empty_history() {
        let store = InMemoryLedgerStore::new();
        let stream = StreamId::keyed(StreamKind::LegalHold, "H-404");
        let records = history(&store, &stream, &HistoryFilter::new()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn filters_combine_conjunctively() {
        let stream = StreamId::singleton(StreamKind::SystemAudit);
        let store = populated(&stream);

        let records = history(
            store.as_ref(),
            &stream,
            &HistoryFilter::new().by_actor("alice").from_seq(2),
        )
        .unwrap();
        let seqs: Vec<_> = records.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![3]);
    }
}
