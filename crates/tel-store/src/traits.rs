use tel_types::{Record, StreamId, TailRef};

use crate::error::StoreResult;

/// Durable, ordered storage of records keyed by `(stream, seq)`.
///
/// All implementations must satisfy these invariants:
/// - `insert` succeeds only into an unoccupied slot; an occupied slot fails
///   with `SequenceConflict` rather than overwriting.
/// - Inserts are atomic: concurrent readers observe a committed prefix of a
///   stream, never a partially written record.
/// - `read_range` returns records strictly ordered by `seq`.
/// - The store never interprets, hashes, or validates record content.
pub trait LedgerStore: Send + Sync {
    /// Sequence number and hash of the stream's newest record.
    ///
    /// Returns `Ok(None)` for a stream with no records yet.
    fn read_tail(&self, stream: &StreamId) -> StoreResult<Option<TailRef>>;

    /// Insert a record at `(record.stream, record.seq)`.
    ///
    /// Fails with `SequenceConflict` if the slot is occupied.
    fn insert(&self, record: &Record) -> StoreResult<()>;

    /// Read records with `from <= seq <= to`, ordered by `seq`.
    ///
    /// `to = None` means "through the tail". Bounds are 1-based and
    /// inclusive; `from == 0` or an inverted range fails with
    /// `InvalidRange`. A stream with no records in range yields an empty
    /// vector, not an error.
    fn read_range(
        &self,
        stream: &StreamId,
        from: u64,
        to: Option<u64>,
    ) -> StoreResult<Vec<Record>>;

    /// All streams that hold at least one record, in stable order.
    fn streams(&self) -> StoreResult<Vec<StreamId>>;

    /// Number of records in a stream (0 for an unknown stream).
    fn record_count(&self, stream: &StreamId) -> StoreResult<u64>;
}
