use crate::config::{FactoringConfig, KeyLayout};
use crate::error::Result;
use crate::types::{CommitInfo, StoreMeta};

/// Invocation-scoped transaction against the state backend
///
/// Every invocation runs inside exactly one transaction. Reads observe the
/// transaction's own uncommitted writes.
///
/// The record layer only needs reads and writes, so it works against
/// `&mut dyn StateTxn`; `commit` and `abort` stay with the host.
///
/// Note: Not required to be Send, as some backends (LMDB) have thread-affine transactions
pub trait StateTxn {
    /// Identifier of this transaction, unique per write
    fn tx_id(&self) -> &str;

    /// Read state; `None` when the key was never written
    fn get_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Write state
    fn put_state(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Largest key the backend accepts, if it has a limit
    fn max_key_size(&self) -> Option<usize> {
        None
    }

    /// Commit all writes of this transaction atomically
    fn commit(self) -> Result<CommitInfo>
    where
        Self: Sized;

    /// Abort transaction, discarding its writes
    fn abort(self)
    where
        Self: Sized;
}

/// Transactional key/value backend
///
/// Provides:
/// - Atomic commit of all writes made in one transaction
/// - Unique, monotonically allocated transaction ids
/// - Strong consistency once a transaction has committed
pub trait StateBackend: Send + Sync {
    type Txn<'a>: StateTxn
    where
        Self: 'a;

    /// Open a backend
    fn open(cfg: FactoringConfig) -> Result<Self>
    where
        Self: Sized;

    /// Close the backend
    fn close(&self) -> Result<()>;

    /// Begin a write transaction with a freshly allocated transaction id
    fn write_txn(&self) -> Result<Self::Txn<'_>>;

    /// Begin a write transaction under a host-supplied transaction id
    ///
    /// The host guarantees the id is unique.
    fn write_txn_with_id(&self, tx_id: &str) -> Result<Self::Txn<'_>>;

    /// Read committed state outside of any write transaction
    fn read_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Key layout the backend was opened with
    fn key_layout(&self) -> KeyLayout;

    /// Get store metadata
    fn meta(&self) -> Result<StoreMeta>;
}
