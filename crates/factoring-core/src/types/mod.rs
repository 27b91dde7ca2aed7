pub mod meta;

pub use meta::{CommitInfo, StoreMeta};

/// Identifier of the write transaction that created a record
///
/// Doubles as the record's primary key.
pub type TxId = String;

/// Format a backend-allocated transaction id from its sequence number
///
/// Zero-padded hex keeps the ids of one store the same length, so
/// lexicographic order matches allocation order.
pub fn format_tx_id(prefix: &str, seq: u64) -> TxId {
    format!("{}{:016x}", prefix, seq)
}
