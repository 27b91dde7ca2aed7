use factoring_core::{
    error::{FactoringError, Result},
    traits::StateTxn,
    types::CommitInfo,
};
use lmdb::{Database, RwTransaction, Transaction, WriteFlags};

use crate::keys::{meta_keys, MAX_KEY_SIZE};

/// Write transaction for the LMDB state backend
///
/// One transaction backs one invocation. Nothing is visible to other
/// transactions until `commit`; dropping without commit aborts.
pub struct LmdbWriteTxn<'a> {
    txn: Option<RwTransaction<'a>>,
    state_db: Database,
    meta_db: Database,
    tx_id: String,
    state_keys_written: usize,
}

impl<'a> LmdbWriteTxn<'a> {
    pub fn new(txn: RwTransaction<'a>, state_db: Database, meta_db: Database, tx_id: String) -> Self {
        Self {
            txn: Some(txn),
            state_db,
            meta_db,
            tx_id,
            state_keys_written: 0,
        }
    }

    fn active(&self) -> Result<&RwTransaction<'a>> {
        self.txn
            .as_ref()
            .ok_or_else(|| FactoringError::InvalidState("Transaction already committed".into()))
    }

    fn active_mut(&mut self) -> Result<&mut RwTransaction<'a>> {
        self.txn
            .as_mut()
            .ok_or_else(|| FactoringError::InvalidState("Transaction already committed".into()))
    }
}

impl<'a> StateTxn for LmdbWriteTxn<'a> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn get_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let txn = self.active()?;
        match txn.get(self.state_db, &key) {
            Ok(bytes) => Ok(Some(bytes.to_vec())),
            Err(lmdb::Error::NotFound) => Ok(None),
            Err(e) => Err(FactoringError::Transaction(e.to_string())),
        }
    }

    fn put_state(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let state_db = self.state_db;
        let txn = self.active_mut()?;
        txn.put(state_db, &key, &value, WriteFlags::empty())
            .map_err(|e| FactoringError::Transaction(e.to_string()))?;

        self.state_keys_written += 1;
        Ok(())
    }

    fn max_key_size(&self) -> Option<usize> {
        Some(MAX_KEY_SIZE)
    }

    fn commit(mut self) -> Result<CommitInfo> {
        let mut txn = self
            .txn
            .take()
            .ok_or_else(|| FactoringError::InvalidState("Transaction already committed".into()))?;

        txn.put(
            self.meta_db,
            &meta_keys::UPDATED_AT,
            &chrono::Utc::now().to_rfc3339(),
            WriteFlags::empty(),
        )
        .map_err(|e| FactoringError::Transaction(e.to_string()))?;

        txn.commit()
            .map_err(|e| FactoringError::Transaction(e.to_string()))?;

        Ok(CommitInfo {
            tx_id: std::mem::take(&mut self.tx_id),
            state_keys_written: self.state_keys_written,
        })
    }

    fn abort(mut self) {
        if let Some(txn) = self.txn.take() {
            txn.abort();
        }
    }
}

impl<'a> Drop for LmdbWriteTxn<'a> {
    fn drop(&mut self) {
        if let Some(txn) = self.txn.take() {
            txn.abort();
        }
    }
}
