//! Configuration validation.
//!
//! Serde handles the syntax; this module checks values. Every problem is
//! reported, not just the first one.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backend.base_url {url:?} is not a valid URL: {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("backend.base_url {0:?} must use http or https")]
    UnsupportedScheme(String),

    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("security.max_body_size must be non-zero")]
    ZeroBodyLimit,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.backend.base_url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::UnsupportedScheme(
                config.backend.base_url.clone(),
            ));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidBackendUrl {
            url: config.backend.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
