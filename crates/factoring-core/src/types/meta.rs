use crate::config::KeyLayout;
use crate::types::TxId;
use serde::{Deserialize, Serialize};

/// Metadata about the store state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMeta {
    /// Sequence number the next allocated transaction id will carry
    pub next_tx_seq: u64,

    /// Key layout the store was created with
    pub key_layout: KeyLayout,

    /// Schema version of the store
    pub schema_version: u32,

    /// Creation timestamp (ISO 8601)
    pub created_at: String,

    /// Last updated timestamp (ISO 8601)
    pub updated_at: String,
}

impl StoreMeta {
    pub fn new(key_layout: KeyLayout) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            next_tx_seq: 0,
            key_layout,
            schema_version: 1,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Information about a committed transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitInfo {
    /// Transaction id the writes were made under
    pub tx_id: TxId,

    /// Number of state keys written
    pub state_keys_written: usize,
}
