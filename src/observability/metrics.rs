//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): gateway responses by operation, status
//! - `gateway_request_duration_seconds` (histogram): end-to-end handler latency
//! - `gateway_backend_duration_seconds` (histogram): backend call latency by
//!   operation and outcome
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one gateway response.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record one outbound backend call.
pub fn record_backend_call(operation: &'static str, success: bool, start: Instant) {
    let outcome = if success { "success" } else { "failure" };
    histogram!(
        "gateway_backend_duration_seconds",
        "operation" => operation,
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}
