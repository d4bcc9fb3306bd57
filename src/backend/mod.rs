//! Compute backend client subsystem.
//!
//! # Data Flow
//! ```text
//! GatewayConfig.backend (base URL, read once at startup)
//!     → client.rs (one reqwest call per gateway operation)
//!     → types.rs (JSON object body or BackendError)
//! ```

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{BackendError, BackendResult, JsonObject, ProcessRequest};
