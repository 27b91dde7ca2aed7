//! Factoring Prelude
//!
//! Import this to get all commonly used types and traits:
//!
//! ```
//! use factoring::prelude::*;
//! ```

// Core types
pub use crate::{CommitInfo, FactoringDb, FactoringError, Result, StoreMeta, TxId};

// Configs
pub use crate::{FactoringConfig, KeyLayout, SyncMode};

// Traits
pub use crate::{StateBackend, StateTxn};

// Implementations
pub use crate::{LmdbStateStore, MemoryStateStore};

// Record and index layer
pub use crate::{IndexResolver, Lookup, Record, RecordStore};

// Dispatch
pub use crate::{Operation, Response, Router, Status};

// Re-export common external deps
pub use serde::{Deserialize, Serialize};
pub use tracing;
