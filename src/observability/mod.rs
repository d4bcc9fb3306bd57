//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and backend client produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the inbound header into every log line and the
//!   outbound backend call
//! - Metrics are disabled by default; recording without a recorder is free

pub mod logging;
pub mod metrics;
