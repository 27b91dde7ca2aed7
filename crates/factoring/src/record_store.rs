//! Thin synchronous wrapper over the backend transaction
//!
//! Each call maps 1:1 to a backend call: no retries, no caching, no batching.

use crate::{FactoringError, Result, StateTxn};

/// Reads and writes opaque payloads within one invocation's transaction
pub struct RecordStore<'t> {
    txn: &'t mut dyn StateTxn,
}

impl<'t> RecordStore<'t> {
    pub fn new(txn: &'t mut dyn StateTxn) -> Self {
        Self { txn }
    }

    /// Raw payload stored under `key`
    ///
    /// An unset key yields empty bytes; absence is not an error.
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.txn
            .get_state(key.as_bytes())
            .map(Option::unwrap_or_default)
            .map_err(|e| FactoringError::StoreRead {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Write `value` under `key` in the current transaction
    pub fn put(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.txn
            .put_state(key.as_bytes(), value)
            .map_err(|e| FactoringError::StoreWrite {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fail with `KeyTooLarge` if the backend would reject `key`
    pub fn check_key(&self, key: &str) -> Result<()> {
        match self.txn.max_key_size() {
            Some(max) if key.len() > max => Err(FactoringError::KeyTooLarge {
                size: key.len(),
                max,
            }),
            _ => Ok(()),
        }
    }

    /// Identifier of the enclosing transaction
    pub fn tx_id(&self) -> &str {
        self.txn.tx_id()
    }
}
