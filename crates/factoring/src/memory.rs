//! In-memory state backend
//!
//! Keeps state in a map guarded by a read/write lock. A transaction buffers
//! its writes and applies them all at once on commit; dropping it without
//! commit discards them. Nothing survives the process.
//!
//! Write transactions are serialized: each one holds the writer lock until it
//! commits or aborts. As with LMDB, the tx sequence only advances on commit.

use crate::{
    CommitInfo, FactoringConfig, FactoringError, KeyLayout, Result, StateBackend, StateTxn,
    StoreMeta,
};
use factoring_core::config::store::DEFAULT_TX_ID_PREFIX;
use factoring_core::types::format_tx_id;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::collections::HashMap;

pub struct MemoryStateStore {
    state: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
    writer: Mutex<StoreMeta>,
    key_layout: KeyLayout,
    tx_id_prefix: String,
}

impl MemoryStateStore {
    pub fn new(key_layout: KeyLayout) -> Self {
        Self::build(key_layout, DEFAULT_TX_ID_PREFIX.to_string())
    }

    fn build(key_layout: KeyLayout, tx_id_prefix: String) -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
            writer: Mutex::new(StoreMeta::new(key_layout)),
            key_layout,
            tx_id_prefix,
        }
    }

    /// Number of keys currently committed
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }
}

impl StateBackend for MemoryStateStore {
    type Txn<'a> = MemoryTxn<'a>;

    fn open(cfg: FactoringConfig) -> Result<Self> {
        Ok(Self::build(cfg.key_layout, cfg.tx_id_prefix))
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn write_txn(&self) -> Result<Self::Txn<'_>> {
        let meta = self.writer.lock();
        let tx_id = format_tx_id(&self.tx_id_prefix, meta.next_tx_seq);
        Ok(MemoryTxn::new(self, meta, tx_id, true))
    }

    fn write_txn_with_id(&self, tx_id: &str) -> Result<Self::Txn<'_>> {
        if tx_id.is_empty() {
            return Err(FactoringError::InvalidState(
                "Transaction id must not be empty".into(),
            ));
        }
        let meta = self.writer.lock();
        Ok(MemoryTxn::new(self, meta, tx_id.to_string(), false))
    }

    fn read_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.state.read().get(key).cloned())
    }

    fn key_layout(&self) -> KeyLayout {
        self.key_layout
    }

    /// Store metadata; blocks while a write transaction is open
    fn meta(&self) -> Result<StoreMeta> {
        Ok(self.writer.lock().clone())
    }
}

/// Write transaction for the in-memory backend
pub struct MemoryTxn<'a> {
    store: &'a MemoryStateStore,
    meta: MutexGuard<'a, StoreMeta>,
    tx_id: String,
    allocated: bool,
    pending: HashMap<Vec<u8>, Vec<u8>>,
    state_keys_written: usize,
}

impl<'a> MemoryTxn<'a> {
    fn new(
        store: &'a MemoryStateStore,
        meta: MutexGuard<'a, StoreMeta>,
        tx_id: String,
        allocated: bool,
    ) -> Self {
        Self {
            store,
            meta,
            tx_id,
            allocated,
            pending: HashMap::new(),
            state_keys_written: 0,
        }
    }
}

impl<'a> StateTxn for MemoryTxn<'a> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn get_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if let Some(value) = self.pending.get(key) {
            return Ok(Some(value.clone()));
        }
        self.store.read_state(key)
    }

    fn put_state(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.pending.insert(key.to_vec(), value.to_vec());
        self.state_keys_written += 1;
        Ok(())
    }

    fn commit(mut self) -> Result<CommitInfo> {
        if self.allocated {
            self.meta.next_tx_seq += 1;
        }
        self.meta.updated_at = chrono::Utc::now().to_rfc3339();
        self.store.state.write().extend(self.pending);

        Ok(CommitInfo {
            tx_id: self.tx_id,
            state_keys_written: self.state_keys_written,
        })
    }

    fn abort(self) {}
}
