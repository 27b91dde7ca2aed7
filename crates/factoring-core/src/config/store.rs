use crate::error::{FactoringError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_TX_ID_PREFIX: &str = "tx-";

/// Configuration for a factoring store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoringConfig {
    /// Path to the store directory
    pub path: PathBuf,

    /// Maximum map size for LMDB (in bytes)
    /// Default: 1GB
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Maximum number of readers (LMDB specific)
    /// Default: 126
    #[serde(default = "default_max_readers")]
    pub max_readers: u32,

    /// Sync mode for durability
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// How records and index entries are laid out in the key space
    ///
    /// Must not change once a store holds data.
    #[serde(default)]
    pub key_layout: KeyLayout,

    /// Prefix prepended to backend-allocated transaction ids (default: "tx-")
    #[serde(default = "default_tx_id_prefix")]
    pub tx_id_prefix: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Calls `fsync()` on every commit.
    Full,

    /// Skips syncing the LMDB meta-page on each commit (default).
    ///
    /// The last transaction may be lost on an OS crash, but the database
    /// stays consistent.
    #[default]
    NoMetaSync,

    /// Disables `fsync()` entirely. Only for ephemeral or test workloads.
    NoSync,
}

/// Key space layout for records and index entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum KeyLayout {
    /// Records, index entries and the liveness sentinel share one flat key
    /// space. A business number equal to a transaction id overwrites the
    /// record stored under that id.
    #[default]
    Flat,

    /// Records live under `record/`, index entries under `index/`.
    Namespaced,
}

impl KeyLayout {
    pub const RECORD_PREFIX: &'static str = "record/";
    pub const INDEX_PREFIX: &'static str = "index/";

    /// Storage key for a record stored under `primary_key`
    pub fn record_key(&self, primary_key: &str) -> String {
        match self {
            KeyLayout::Flat => primary_key.to_string(),
            KeyLayout::Namespaced => format!("{}{}", Self::RECORD_PREFIX, primary_key),
        }
    }

    /// Storage key for the index entry of `business_no`
    pub fn index_key(&self, business_no: &str) -> String {
        match self {
            KeyLayout::Flat => business_no.to_string(),
            KeyLayout::Namespaced => format!("{}{}", Self::INDEX_PREFIX, business_no),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyLayout::Flat => "flat",
            KeyLayout::Namespaced => "namespaced",
        }
    }
}

impl FromStr for KeyLayout {
    type Err = FactoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flat" => Ok(KeyLayout::Flat),
            "namespaced" => Ok(KeyLayout::Namespaced),
            other => Err(FactoringError::Config(format!(
                "Unknown key layout {:?}",
                other
            ))),
        }
    }
}

fn default_map_size() -> usize {
    1024 * 1024 * 1024 // 1GB
}

fn default_max_readers() -> u32 {
    126
}

fn default_tx_id_prefix() -> String {
    DEFAULT_TX_ID_PREFIX.to_string()
}

impl FactoringConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            map_size: default_map_size(),
            max_readers: default_max_readers(),
            sync_mode: SyncMode::default(),
            key_layout: KeyLayout::default(),
            tx_id_prefix: default_tx_id_prefix(),
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)
            .map_err(|e| FactoringError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.map_size == 0 {
            return Err(FactoringError::Config("map_size must be positive".into()));
        }
        if self.max_readers == 0 {
            return Err(FactoringError::Config(
                "max_readers must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    pub fn with_key_layout(mut self, key_layout: KeyLayout) -> Self {
        self.key_layout = key_layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let cfg: FactoringConfig = serde_json::from_str(r#"{"path":"/tmp/factoring"}"#).unwrap();
        assert_eq!(cfg.key_layout, KeyLayout::Flat);
        assert_eq!(cfg.sync_mode, SyncMode::NoMetaSync);
        assert_eq!(cfg.tx_id_prefix, "tx-");
        assert_eq!(cfg.max_readers, 126);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(KeyLayout::Flat.record_key("TX-1"), "TX-1");
        assert_eq!(KeyLayout::Flat.index_key("BN-1"), "BN-1");
        assert_eq!(KeyLayout::Namespaced.record_key("TX-1"), "record/TX-1");
        assert_eq!(KeyLayout::Namespaced.index_key("BN-1"), "index/BN-1");

        for layout in [KeyLayout::Flat, KeyLayout::Namespaced] {
            assert_eq!(layout.as_str().parse::<KeyLayout>().unwrap(), layout);
        }
        assert!("sharded".parse::<KeyLayout>().is_err());
    }

    #[test]
    fn test_zero_map_size_rejected() {
        let cfg = FactoringConfig::new(PathBuf::from("/tmp/x")).with_map_size(0);
        assert!(matches!(cfg.validate(), Err(FactoringError::Config(_))));
    }
}
