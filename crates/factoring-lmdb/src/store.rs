use factoring_core::{
    config::SyncMode,
    error::{FactoringError, Result},
    traits::StateBackend,
    types::{format_tx_id, StoreMeta},
    FactoringConfig, KeyLayout,
};
use lmdb::{Database, DatabaseFlags, Environment, EnvironmentFlags, Transaction, WriteFlags};
use std::sync::Arc;

use crate::keys::meta_keys;
use crate::txn::LmdbWriteTxn;

/// LMDB-backed state backend
///
/// State lives in the `state` database; the transaction-id sequence, key
/// layout and timestamps live in `meta`. LMDB serializes write transactions,
/// so tx-id allocation inside the write transaction is race free.
///
/// Keys are limited to [`MAX_KEY_SIZE`](crate::keys::MAX_KEY_SIZE) bytes;
/// the record layer checks both keys of a save before writing either.
pub struct LmdbStateStore {
    pub(crate) env: Arc<Environment>,
    pub(crate) state_db: Database,
    pub(crate) meta_db: Database,
    key_layout: KeyLayout,
    tx_id_prefix: String,
}

impl LmdbStateStore {
    /// Get meta value
    fn get_meta<T: Transaction>(&self, txn: &T, key: &str) -> Result<Option<String>> {
        read_meta(txn, self.meta_db, key)
    }

    /// Get the next transaction sequence from meta
    fn get_next_tx_seq<T: Transaction>(&self, txn: &T) -> Result<u64> {
        match self.get_meta(txn, meta_keys::NEXT_TX_SEQ)? {
            Some(s) => s
                .parse::<u64>()
                .map_err(|e| FactoringError::Serialization(e.to_string())),
            None => Ok(0),
        }
    }

    fn begin_rw(&self) -> Result<lmdb::RwTransaction<'_>> {
        self.env
            .begin_rw_txn()
            .map_err(|e| FactoringError::Transaction(e.to_string()))
    }
}

fn read_meta<T: Transaction>(txn: &T, meta_db: Database, key: &str) -> Result<Option<String>> {
    match txn.get(meta_db, &key) {
        Ok(bytes) => {
            let value = std::str::from_utf8(bytes)
                .map_err(|e| FactoringError::Serialization(e.to_string()))?
                .to_string();
            Ok(Some(value))
        }
        Err(lmdb::Error::NotFound) => Ok(None),
        Err(e) => Err(FactoringError::Transaction(e.to_string())),
    }
}

fn put_meta(txn: &mut lmdb::RwTransaction, meta_db: Database, key: &str, value: &str) -> Result<()> {
    txn.put(meta_db, &key, &value, WriteFlags::empty())
        .map_err(|e| FactoringError::Transaction(e.to_string()))
}

impl StateBackend for LmdbStateStore {
    type Txn<'a> = LmdbWriteTxn<'a>;

    fn open(cfg: FactoringConfig) -> Result<Self> {
        cfg.validate()?;

        // Create directory if it doesn't exist
        std::fs::create_dir_all(&cfg.path)?;

        let mut env_builder = Environment::new();
        env_builder.set_max_dbs(2); // state, meta
        env_builder.set_map_size(cfg.map_size);
        env_builder.set_max_readers(cfg.max_readers);

        let mut flags = EnvironmentFlags::empty();
        match cfg.sync_mode {
            SyncMode::Full => {}
            SyncMode::NoMetaSync => {
                flags.insert(EnvironmentFlags::NO_META_SYNC);
            }
            SyncMode::NoSync => {
                flags.insert(EnvironmentFlags::NO_SYNC);
            }
        }
        env_builder.set_flags(flags);

        let env = env_builder
            .open(&cfg.path)
            .map_err(|e| FactoringError::Io(std::io::Error::other(e)))?;

        let state_db = env
            .create_db(Some("state"), DatabaseFlags::empty())
            .map_err(|e| FactoringError::Transaction(e.to_string()))?;

        let meta_db = env
            .create_db(Some("meta"), DatabaseFlags::empty())
            .map_err(|e| FactoringError::Transaction(e.to_string()))?;

        // Initialize metadata if needed
        {
            let mut txn = env
                .begin_rw_txn()
                .map_err(|e| FactoringError::Transaction(e.to_string()))?;

            match read_meta(&txn, meta_db, meta_keys::KEY_LAYOUT)? {
                Some(stored) => {
                    let stored_layout: KeyLayout = stored.parse()?;
                    if stored_layout != cfg.key_layout {
                        return Err(FactoringError::Config(format!(
                            "Store was created with key layout {}, refusing to open as {}",
                            stored_layout.as_str(),
                            cfg.key_layout.as_str()
                        )));
                    }
                }
                None => put_meta(&mut txn, meta_db, meta_keys::KEY_LAYOUT, cfg.key_layout.as_str())?,
            }

            if read_meta(&txn, meta_db, meta_keys::NEXT_TX_SEQ)?.is_none() {
                put_meta(&mut txn, meta_db, meta_keys::NEXT_TX_SEQ, "0")?;
            }

            if read_meta(&txn, meta_db, meta_keys::SCHEMA_VERSION)?.is_none() {
                put_meta(&mut txn, meta_db, meta_keys::SCHEMA_VERSION, "1")?;
            }

            let now = chrono::Utc::now().to_rfc3339();
            if read_meta(&txn, meta_db, meta_keys::CREATED_AT)?.is_none() {
                put_meta(&mut txn, meta_db, meta_keys::CREATED_AT, &now)?;
            }
            put_meta(&mut txn, meta_db, meta_keys::UPDATED_AT, &now)?;

            txn.commit()
                .map_err(|e| FactoringError::Transaction(e.to_string()))?;
        }

        tracing::debug!(
            "Opened LMDB state store at {} ({} layout)",
            cfg.path.display(),
            cfg.key_layout.as_str()
        );

        Ok(Self {
            env: Arc::new(env),
            state_db,
            meta_db,
            key_layout: cfg.key_layout,
            tx_id_prefix: cfg.tx_id_prefix,
        })
    }

    fn close(&self) -> Result<()> {
        // LMDB closes automatically on drop
        Ok(())
    }

    fn write_txn(&self) -> Result<Self::Txn<'_>> {
        let mut txn = self.begin_rw()?;

        // Allocate the tx id inside the write transaction; an aborted
        // transaction leaves the sequence untouched.
        let seq = self.get_next_tx_seq(&txn)?;
        put_meta(
            &mut txn,
            self.meta_db,
            meta_keys::NEXT_TX_SEQ,
            &(seq + 1).to_string(),
        )?;

        let tx_id = format_tx_id(&self.tx_id_prefix, seq);
        Ok(LmdbWriteTxn::new(txn, self.state_db, self.meta_db, tx_id))
    }

    fn write_txn_with_id(&self, tx_id: &str) -> Result<Self::Txn<'_>> {
        if tx_id.is_empty() {
            return Err(FactoringError::InvalidState(
                "Transaction id must not be empty".into(),
            ));
        }
        let txn = self.begin_rw()?;
        Ok(LmdbWriteTxn::new(
            txn,
            self.state_db,
            self.meta_db,
            tx_id.to_string(),
        ))
    }

    fn read_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let txn = self
            .env
            .begin_ro_txn()
            .map_err(|e| FactoringError::Transaction(e.to_string()))?;

        match txn.get(self.state_db, &key) {
            Ok(bytes) => Ok(Some(bytes.to_vec())),
            Err(lmdb::Error::NotFound) => Ok(None),
            Err(e) => Err(FactoringError::Transaction(e.to_string())),
        }
    }

    fn key_layout(&self) -> KeyLayout {
        self.key_layout
    }

    fn meta(&self) -> Result<StoreMeta> {
        let txn = self
            .env
            .begin_ro_txn()
            .map_err(|e| FactoringError::Transaction(e.to_string()))?;

        let next_tx_seq = self.get_next_tx_seq(&txn)?;
        let schema_version = self
            .get_meta(&txn, meta_keys::SCHEMA_VERSION)?
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        let created_at = self
            .get_meta(&txn, meta_keys::CREATED_AT)?
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
        let updated_at = self
            .get_meta(&txn, meta_keys::UPDATED_AT)?
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        Ok(StoreMeta {
            next_tx_seq,
            key_layout: self.key_layout,
            schema_version,
            created_at,
            updated_at,
        })
    }
}
