//! Factoring Core: Traits and types for the factoring record store
//!
//! This crate defines the abstractions shared by the backends and the
//! record/index layer:
//! - Backend traits: invocation-scoped transactions over a KV state store
//! - Configuration: store path, durability, key layout
//! - Error taxonomy shared by every crate in the workspace
//! - Optional metrics hooks (`observe` feature)

pub mod config;
pub mod error;
pub mod observe;
pub mod traits;
pub mod types;

pub use config::{FactoringConfig, KeyLayout, SyncMode};
pub use error::{FactoringError, Result};
pub use traits::{StateBackend, StateTxn};
pub use types::{CommitInfo, StoreMeta, TxId};
