//! Invocation response returned to the host

use serde::{Deserialize, Serialize};

/// Response status, numbered like the host protocol
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    Error,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::NotFound => 404,
            Status::Error => 500,
        }
    }
}

/// Result of one invocation
///
/// Hard errors never escape an invocation; they become a response with
/// [`Status::Error`] and the error text as message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub message: String,
    pub payload: Option<Vec<u8>>,
}

impl Response {
    pub fn success() -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            payload: None,
        }
    }

    pub fn success_with_payload(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Ok,
            message: String::from_utf8_lossy(&payload).into_owned(),
            payload: Some(payload),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: Status::NotFound,
            message: message.into(),
            payload: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            payload: None,
        }
    }

    /// True unless the invocation failed; a miss is still a success
    pub fn is_success(&self) -> bool {
        self.status != Status::Error
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }
}
