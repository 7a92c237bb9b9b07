use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tel_types::{StreamId, TailRef};

/// Mutable per-stream state, owned exclusively by the chain manager and
/// only ever touched under the stream's mutex.
#[derive(Default)]
pub struct StreamState {
    /// Tail after the last successful append. `None` means "unknown, read
    /// the store" — both before first use and after a failed insert, when
    /// the cache can no longer be trusted.
    pub(crate) cached_tail: Option<TailRef>,
}

/// Maps stream identities to their append lock and tail cache.
///
/// Stream state is created lazily on first use. Creation is double-checked
/// under the map's write lock, so two concurrent first-appends to the same
/// unseen stream end up serialized on one mutex rather than racing on two.
#[derive(Default)]
pub struct StreamRegistry {
    streams: RwLock<HashMap<StreamId, Arc<Mutex<StreamState>>>>,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock-and-cache cell for a stream, creating it if unseen.
    pub fn state(&self, stream: &StreamId) -> Arc<Mutex<StreamState>> {
        if let Some(state) = self.streams.read().get(stream) {
            return Arc::clone(state);
        }
        let mut streams = self.streams.write();
        Arc::clone(streams.entry(stream.clone()).or_default())
    }

    /// Number of streams with materialized state.
    pub fn len(&self) -> usize {
        self.streams.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.read().is_empty()
    }
}
