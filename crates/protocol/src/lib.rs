//! Wire types shared by the mesostic transport surfaces.
//!
//! The JSON field names on [`Submit`] (`Text`, `SpineString`) are the
//! submission format of the original service and must not change;
//! lowercase aliases are accepted on input for convenience.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Multipart form field carrying the source text
pub const TEXT_FIELD: &str = "text";

/// Stable machine-readable failure codes
pub mod codes {
    pub const EMPTY_SOURCE: &str = "empty_source";
    pub const EMPTY_SPINE: &str = "empty_spine";
    pub const SPINE_EXHAUSTS_SOURCE: &str = "spine_exhausts_source";
    pub const INVALID_REQUEST: &str = "invalid_request";
}

/// A composition submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submit {
    #[serde(rename = "Text", alias = "text")]
    pub text: String,

    #[serde(rename = "SpineString", alias = "spine_string")]
    pub spine_string: String,
}

/// Failure payload returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    /// Envelope with a code and message only
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a remediation hint
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
