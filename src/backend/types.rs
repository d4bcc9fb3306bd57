//! Wire types and error definitions for the compute backend.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque JSON object passed through from the backend.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Validated payload sent to `POST /process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub data: Vec<i64>,
    pub operation: String,
}

/// Longest slice of an error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 256;

/// Errors that can occur while calling the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection, DNS, timeout or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("backend returned {status}{}", body_suffix(.body))]
    Status { status: StatusCode, body: String },

    /// Body was not a JSON object.
    #[error("invalid backend response: {0}")]
    Decode(String),
}

impl BackendError {
    pub(crate) fn status(status: StatusCode, body: &[u8]) -> Self {
        let body: String = String::from_utf8_lossy(body)
            .trim()
            .chars()
            .take(MAX_ERROR_BODY)
            .collect();
        Self::Status { status, body }
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;
