pub mod store;

pub use store::{FactoringConfig, KeyLayout, SyncMode};
