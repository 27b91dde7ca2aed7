//! Parsed view of a business record
//!
//! Records are stored as the exact bytes the caller sent. Parsing only
//! serves to extract `businessNo`; every other field is kept as-is.

use crate::{FactoringError, Result};
use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A business record payload
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    #[serde(rename = "businessNo", default, deserialize_with = "lenient_business_no")]
    business_no: Option<String>,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Record {
    /// Parse a raw payload, which must be a JSON object
    pub fn parse(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).map_err(|e| FactoringError::MalformedRecord(e.to_string()))
    }

    /// The business identifier, rejecting absent or empty values
    pub fn business_no(&self) -> Result<&str> {
        match self.business_no.as_deref() {
            Some(business_no) if !business_no.is_empty() => Ok(business_no),
            _ => Err(FactoringError::MissingBusinessId),
        }
    }

    /// Fields other than `businessNo`
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Accepts a string or a number; `null` counts as absent
fn lenient_business_no<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(_) => Err(de::Error::custom("businessNo must be a string, got a boolean")),
        Value::Array(_) => Err(de::Error::custom("businessNo must be a string, got an array")),
        Value::Object(_) => Err(de::Error::custom("businessNo must be a string, got an object")),
    }
}
