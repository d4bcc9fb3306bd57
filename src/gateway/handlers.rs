//! Handlers for `/api/process`, `/api/rust-health` and `/api/rust-stats`.
//!
//! Each handler makes exactly one backend call and maps its failure to a
//! distinct caller-facing message. The three flows are kept separate on
//! purpose: the messages are part of the HTTP contract.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::{JsonObject, ProcessRequest};
use crate::gateway::error::GatewayError;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Inbound body of `POST /api/process`. Both fields are optional here so a
/// missing field is reported as a validation error rather than a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessBody {
    #[serde(default)]
    pub data: Option<Vec<i64>>,
    #[serde(default)]
    pub operation: Option<String>,
}

impl ProcessBody {
    /// Check presence and non-emptiness of both fields.
    pub fn validate(self) -> Result<ProcessRequest, GatewayError> {
        match (self.data, self.operation) {
            (Some(data), Some(operation)) if !data.is_empty() && !operation.is_empty() => {
                Ok(ProcessRequest { data, operation })
            }
            _ => Err(GatewayError::missing_input()),
        }
    }
}

/// Spread the backend result at top level; the gateway's `success` wins.
pub fn merge_process_result(mut result: JsonObject) -> Value {
    result.insert("success".to_string(), Value::Bool(true));
    Value::Object(result)
}

pub async fn process(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ProcessBody>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = forward_process(&state, body, request_id).await;

    respond("process", start, request_id, result)
}

async fn forward_process(
    state: &AppState,
    body: Result<Json<ProcessBody>, JsonRejection>,
    request_id: Option<&str>,
) -> Result<Value, GatewayError> {
    let Json(body) = body.map_err(|rejection| GatewayError::invalid_body(rejection.body_text()))?;
    let request = body.validate()?;

    tracing::info!(
        request_id = request_id.unwrap_or("-"),
        operation = %request.operation,
        items = request.data.len(),
        "Forwarding process request"
    );

    state
        .backend
        .process(&request, request_id)
        .await
        .map(merge_process_result)
        .map_err(|e| GatewayError::process_failed(&e))
}

pub async fn health(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = state
        .backend
        .health(request_id)
        .await
        .map(|health| json!({ "success": true, "rust_backend": health }))
        .map_err(|e| GatewayError::backend_unavailable(&e));

    respond("health", start, request_id, result)
}

pub async fn stats(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = state
        .backend
        .stats(request_id)
        .await
        .map(|stats| json!({ "success": true, "stats": stats }))
        .map_err(|e| GatewayError::stats_failed(&e));

    respond("stats", start, request_id, result)
}

fn respond(
    operation: &'static str,
    start: Instant,
    request_id: Option<&str>,
    result: Result<Value, GatewayError>,
) -> Response {
    let response = match result {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            tracing::warn!(
                request_id = request_id.unwrap_or("-"),
                operation,
                kind = ?err.kind,
                error = %err.message,
                details = err.detail.as_deref().unwrap_or(""),
                "Gateway operation failed"
            );
            err.into_response()
        }
    };

    metrics::record_request(operation, response.status().as_u16(), start);
    response
}
