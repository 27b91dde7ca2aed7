//! Factoring: record storage with a business-number index
//!
//! Persists opaque business records under the transaction id that wrote them
//! and keeps a secondary index from each record's `businessNo` to that id:
//! - **Record store**: raw reads and writes against a transactional KV backend
//! - **Index resolver**: the write path and the two-step business-number read
//! - **Liveness probe**: a sentinel written at init and read back on demand
//! - **Router**: named host operations mapped to handlers
//! - **Backends**: LMDB (durable) and in-memory
//!
//! # Quick Start
//!
//! ```no_run
//! use factoring::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let db = FactoringDb::open("./data")?;
//! db.init();
//!
//! let saved = db.invoke("SaveData", &[r#"{"businessNo":"BN-1","amount":100}"#.to_string()]);
//! let tx_id = String::from_utf8_lossy(saved.payload().unwrap_or_default()).into_owned();
//!
//! let by_tx = db.invoke("QueryDataByFabricTxId", &[tx_id]);
//! let by_bn = db.invoke("QueryDataByBusinessNo", &["BN-1".to_string()]);
//! assert_eq!(by_tx.payload(), by_bn.payload());
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod dispatch;
pub mod index;
pub mod liveness;
pub mod memory;
pub mod operation;
pub mod prelude;
pub mod record;
pub mod record_store;
pub mod response;

pub(crate) use factoring_core::observe;

// Re-export core types
pub use factoring_core::{
    config::{FactoringConfig, KeyLayout, SyncMode},
    error::{FactoringError, Result},
    traits::{StateBackend, StateTxn},
    types::{CommitInfo, StoreMeta, TxId},
};

// Re-export implementations
pub use factoring_lmdb::LmdbStateStore;

// Re-export main types from this crate
pub use db::FactoringDb;
pub use dispatch::Router;
pub use index::{IndexResolver, Lookup};
pub use memory::{MemoryStateStore, MemoryTxn};
pub use operation::Operation;
pub use record::Record;
pub use record_store::RecordStore;
pub use response::{Response, Status};
