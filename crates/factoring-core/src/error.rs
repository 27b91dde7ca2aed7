use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactoringError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("businessNo must exist")]
    MissingBusinessId,

    #[error("Store write error on key {key:?}: {reason}")]
    StoreWrite { key: String, reason: String },

    #[error("Store read error on key {key:?}: {reason}")]
    StoreRead { key: String, reason: String },

    #[error("Key of {size} bytes exceeds the backend limit of {max} bytes")]
    KeyTooLarge { size: usize, max: usize },

    #[error("ERROR! KeepaliveQuery get result is {}", found.as_deref().unwrap_or("null"))]
    LivenessMismatch { found: Option<String> },

    #[error("Invalid invoke function name: {0}")]
    UnknownOperation(String),

    #[error("function other than init is not supported: {0}")]
    UnsupportedInit(String),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl FactoringError {
    /// True for errors caused by the caller's input rather than the backend
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            FactoringError::MalformedRecord(_)
                | FactoringError::MissingBusinessId
                | FactoringError::KeyTooLarge { .. }
                | FactoringError::UnknownOperation(_)
                | FactoringError::UnsupportedInit(_)
                | FactoringError::InvalidArguments(_)
        )
    }
}

impl From<serde_json::Error> for FactoringError {
    fn from(err: serde_json::Error) -> Self {
        FactoringError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FactoringError>;
