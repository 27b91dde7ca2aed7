/// Largest key LMDB accepts with its default build settings
pub const MAX_KEY_SIZE: usize = 511;

/// Meta keys used in the meta database
pub mod meta_keys {
    pub const NEXT_TX_SEQ: &str = "next_tx_seq";
    pub const KEY_LAYOUT: &str = "key_layout";
    pub const SCHEMA_VERSION: &str = "schema_version";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
}
