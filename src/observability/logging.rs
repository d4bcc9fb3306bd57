//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber
//! - Pick the filter from `RUST_LOG`, falling back to the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` always wins so operators can raise verbosity per target

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Directive used when neither `RUST_LOG` nor the config yields a filter.
const FALLBACK_FILTER: &str = "compute_gateway=info,tower_http=info";

/// Build the filter directive for a configured log level.
pub fn default_directive(log_level: &str) -> String {
    let level = log_level.trim();
    if level.is_empty() {
        FALLBACK_FILTER.to_string()
    } else {
        format!("compute_gateway={level},tower_http={level}")
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(&config.log_level)))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
