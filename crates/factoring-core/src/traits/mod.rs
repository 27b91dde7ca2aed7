pub mod backend;

pub use backend::{StateBackend, StateTxn};
