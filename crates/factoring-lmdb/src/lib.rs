//! LMDB-backed state backend
//!
//! Provides a transactional KV store using LMDB.
//!
//! Key features:
//! - Atomic commit of all writes of one invocation
//! - Transaction ids allocated from a persisted sequence
//! - Key layout pinned in the meta database at creation
//! - Single-writer semantics (enforced by LMDB)

pub mod keys;
pub mod store;
pub mod txn;

pub use store::LmdbStateStore;
pub use txn::LmdbWriteTxn;
