//! Liveness probe
//!
//! A fixed sentinel is written when the store is initialized and read back
//! on demand. Any other stored value, including none at all, means the
//! backend is corrupt or misconfigured.

use crate::record_store::RecordStore;
use crate::{observe, FactoringError, Result};

pub const KEEPALIVE_KEY: &str = "keepAliveTest";
pub const KEEPALIVE_VALUE: &str = "keepAliveTestValue";

/// Payload returned by a successful probe
pub const REACHED: &[u8] = b"Reached";

/// Write the sentinel
pub fn seed(store: &mut RecordStore<'_>) -> Result<()> {
    tracing::info!("Writing keep-alive sentinel");
    store.put(KEEPALIVE_KEY, KEEPALIVE_VALUE.as_bytes())
}

/// Read the sentinel back and compare it with the expected constant
pub fn probe(store: &RecordStore<'_>) -> Result<()> {
    let stored = store.get(KEEPALIVE_KEY)?;
    if stored == KEEPALIVE_VALUE.as_bytes() {
        observe::record_liveness(true);
        return Ok(());
    }

    observe::record_liveness(false);
    let found = if stored.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&stored).into_owned())
    };
    tracing::warn!("Keep-alive sentinel mismatch, found {:?}", found);
    Err(FactoringError::LivenessMismatch { found })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStateStore;
    use crate::{KeyLayout, StateBackend, StateTxn};

    #[test]
    fn test_probe_after_seed() {
        let backend = MemoryStateStore::new(KeyLayout::Flat);
        let mut txn = backend.write_txn().unwrap();
        let mut store = RecordStore::new(&mut txn);

        seed(&mut store).unwrap();
        assert!(probe(&store).is_ok());
    }

    #[test]
    fn test_probe_without_seed() {
        let backend = MemoryStateStore::new(KeyLayout::Flat);
        let mut txn = backend.write_txn().unwrap();
        let store = RecordStore::new(&mut txn);

        assert!(matches!(
            probe(&store),
            Err(FactoringError::LivenessMismatch { found: None })
        ));
    }

    #[test]
    fn test_probe_with_wrong_value() {
        let backend = MemoryStateStore::new(KeyLayout::Flat);
        let mut txn = backend.write_txn().unwrap();
        txn.put_state(KEEPALIVE_KEY.as_bytes(), b"keepAliveTestValue2")
            .unwrap();
        let store = RecordStore::new(&mut txn);

        match probe(&store) {
            Err(FactoringError::LivenessMismatch { found }) => {
                assert_eq!(found.as_deref(), Some("keepAliveTestValue2"))
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }
}
