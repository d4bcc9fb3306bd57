//! HTTP gateway in front of an external compute backend.

pub mod backend;
pub mod client;
pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use backend::BackendClient;
pub use config::schema::GatewayConfig;
pub use gateway::{GatewayError, GatewayErrorKind};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
