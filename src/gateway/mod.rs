//! Forwarding gateway.
//!
//! # Data Flow
//! ```text
//! caller
//!     → handlers.rs (validate, one backend call)
//!     → backend::BackendClient
//!     → handlers.rs (wrap result or map failure)
//!     → error.rs (GatewayError → {error, details} + status)
//!     → caller
//! ```
//!
//! | Route              | Success body                         | Failure status |
//! |--------------------|--------------------------------------|----------------|
//! | POST /api/process  | `{success: true, ...backend fields}` | 400 / 500      |
//! | GET /api/rust-health | `{success: true, rust_backend}`    | 503            |
//! | GET /api/rust-stats  | `{success: true, stats}`           | 500            |

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::server::AppState;

pub use error::{GatewayError, GatewayErrorKind};

pub const PROCESS_PATH: &str = "/api/process";
pub const HEALTH_PATH: &str = "/api/rust-health";
pub const STATS_PATH: &str = "/api/rust-stats";

/// Routes served by the gateway, ready to be merged into the server router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(PROCESS_PATH, post(handlers::process))
        .route(HEALTH_PATH, get(handlers::health))
        .route(STATS_PATH, get(handlers::stats))
}
