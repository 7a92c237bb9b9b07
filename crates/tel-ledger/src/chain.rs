use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tel_crypto::{canonicalize, LinkDigest};
use tel_store::LedgerStore;
use tel_types::{ChainHash, ContentFields, Receipt, Record, StreamId, TailRef};
use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::registry::StreamRegistry;

/// Owner of the append protocol.
///
/// Each append runs entirely under its stream's exclusive lock: read the
/// tail, compute the link, persist, advance the cache. At most one append
/// is in flight per stream at any time, which is what rules out forks (two
/// records claiming the same `prev_hash`). Distinct streams append fully
/// in parallel.
pub struct ChainManager<S> {
    store: Arc<S>,
    registry: StreamRegistry,
    lock_timeout: Duration,
}

impl<S: LedgerStore> ChainManager<S> {
    /// Default bound on waiting for a stream's append lock.
    pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(store: Arc<S>) -> Self {
        Self::with_lock_timeout(store, Self::DEFAULT_LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(store: Arc<S>, lock_timeout: Duration) -> Self {
        Self {
            store,
            registry: StreamRegistry::new(),
            lock_timeout,
        }
    }

    /// Append one record to a stream and return its receipt.
    ///
    /// Fails with `LockTimeout` if the stream lock cannot be acquired in
    /// time (retryable), `InvalidContent` if the fields cannot be
    /// canonicalized, and `SequenceConflict` if the insert hits an occupied
    /// slot — the latter means something bypassed this lock and is never
    /// absorbed by retrying against a re-read tail.
    pub fn append(
        &self,
        stream: StreamId,
        actor: &str,
        content: ContentFields,
    ) -> Result<Receipt, LedgerError> {
        let cell = self.registry.state(&stream);
        let mut state = cell.try_lock_for(self.lock_timeout).ok_or_else(|| {
            warn!(stream = %stream, waited = ?self.lock_timeout, "append lock timeout");
            LedgerError::LockTimeout {
                stream: stream.clone(),
                waited: self.lock_timeout,
            }
        })?;

        let tail = match state.cached_tail {
            Some(tail) => Some(tail),
            None => self.store.read_tail(&stream)?,
        };
        let (seq, prev_hash) = match tail {
            Some(tail) => (tail.seq + 1, tail.content_hash),
            None => (1, ChainHash::GENESIS),
        };

        let timestamp = Utc::now();
        let canonical = canonicalize(actor, &timestamp, &content)?;
        let content_hash = LinkDigest::RECORD.link(&canonical, &prev_hash);

        let record = Record {
            stream: stream.clone(),
            seq,
            actor: actor.to_owned(),
            timestamp,
            content,
            prev_hash,
            content_hash,
        };

        if let Err(err) = self.store.insert(&record) {
            // The tail this append was computed against is not to be
            // trusted anymore; force a store read on the next attempt.
            state.cached_tail = None;
            return Err(err.into());
        }

        state.cached_tail = Some(TailRef { seq, content_hash });
        debug!(
            stream = %stream,
            seq,
            hash = %content_hash.short_hex(),
            "record appended"
        );
        Ok(Receipt::from(&record))
    }

    /// The storage collaborator backing this manager.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}
