//! HTTP client for the compute backend.
//!
//! # Responsibilities
//! - Own the backend base URL resolved at startup
//! - Issue `POST /process`, `GET /health` and `GET /stats`
//! - Return the JSON object body verbatim or the underlying failure
//!
//! # Design Decisions
//! - Single attempt per call, transport default timeouts
//! - No response-shape validation beyond "is a JSON object"
//! - The caller's request ID is forwarded as `x-request-id`

use std::time::Instant;

use reqwest::RequestBuilder;

use crate::backend::types::{BackendError, BackendResult, JsonObject, ProcessRequest};
use crate::config::BackendConfig;
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;

/// Client for the compute backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the configured backend.
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward a processing request.
    pub async fn process(
        &self,
        request: &ProcessRequest,
        request_id: Option<&str>,
    ) -> BackendResult<JsonObject> {
        let builder = self.http.post(self.url("/process")).json(request);
        self.send("process", builder, request_id).await
    }

    /// Fetch the backend health document.
    pub async fn health(&self, request_id: Option<&str>) -> BackendResult<JsonObject> {
        let builder = self.http.get(self.url("/health"));
        self.send("health", builder, request_id).await
    }

    /// Fetch the backend statistics document.
    pub async fn stats(&self, request_id: Option<&str>) -> BackendResult<JsonObject> {
        let builder = self.http.get(self.url("/stats"));
        self.send("stats", builder, request_id).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
        request_id: Option<&str>,
    ) -> BackendResult<JsonObject> {
        let builder = match request_id {
            Some(id) => builder.header(X_REQUEST_ID, id),
            None => builder,
        };

        let start = Instant::now();
        let result = execute(builder).await;
        metrics::record_backend_call(operation, result.is_ok(), start);

        match &result {
            Ok(_) => tracing::debug!(
                operation,
                request_id = request_id.unwrap_or("-"),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Backend call succeeded"
            ),
            Err(e) => tracing::warn!(
                operation,
                request_id = request_id.unwrap_or("-"),
                backend = %self.base_url,
                error = %e,
                "Backend call failed"
            ),
        }

        result
    }
}

async fn execute(builder: RequestBuilder) -> BackendResult<JsonObject> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(BackendError::status(status, &body));
    }

    serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
}
