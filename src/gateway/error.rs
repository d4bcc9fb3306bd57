//! Caller-facing error type for the gateway operations.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;

pub const MSG_INVALID_INPUT: &str = "Data and operation are required";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_PROCESS_FAILED: &str = "Failed to process data";
pub const MSG_BACKEND_UNAVAILABLE: &str = "Rust backend is not available";
pub const MSG_STATS_FAILED: &str = "Failed to get Rust backend stats";

/// Error taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Caller input malformed; never reaches the backend.
    ValidationError,
    /// Backend unreachable on the health path.
    BackendUnavailable,
    /// Any other backend call failure.
    BackendError,
}

impl GatewayErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            GatewayErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            GatewayErrorKind::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            GatewayErrorKind::BackendError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failed gateway operation, rendered as `{error, details}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail,
        }
    }

    /// `data` or `operation` missing or empty.
    pub fn missing_input() -> Self {
        Self::new(GatewayErrorKind::ValidationError, MSG_INVALID_INPUT, None)
    }

    /// Body could not be read as a process request.
    pub fn invalid_body(reason: impl Into<String>) -> Self {
        Self::new(
            GatewayErrorKind::ValidationError,
            MSG_INVALID_BODY,
            Some(reason.into()),
        )
    }

    pub fn process_failed(err: &BackendError) -> Self {
        Self::new(
            GatewayErrorKind::BackendError,
            MSG_PROCESS_FAILED,
            Some(err.to_string()),
        )
    }

    pub fn backend_unavailable(err: &BackendError) -> Self {
        Self::new(
            GatewayErrorKind::BackendUnavailable,
            MSG_BACKEND_UNAVAILABLE,
            Some(err.to_string()),
        )
    }

    pub fn stats_failed(err: &BackendError) -> Self {
        Self::new(
            GatewayErrorKind::BackendError,
            MSG_STATS_FAILED,
            Some(err.to_string()),
        )
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            details: self.detail.as_deref(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
