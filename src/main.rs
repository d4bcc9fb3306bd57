//! Compute gateway
//!
//! Forwards `/api/process`, `/api/rust-health` and `/api/rust-stats` to the
//! compute backend and maps its failures to structured JSON errors.
//!
//! ```text
//!     Client                ┌──────────────────────────────────────┐
//!     ─────────────────────▶│  http server   →   gateway handlers  │
//!                           │  (request id,      (validate, map    │
//!                           │   trace, limit)     errors)          │
//!     ◀─────────────────────│                          │           │
//!                           │                   backend client ────┼───▶ Backend
//!                           └──────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use compute_gateway::config::{self, loader::ENV_CONFIG_PATH};
use compute_gateway::observability::{logging, metrics};
use compute_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "compute-gateway")]
#[command(about = "HTTP gateway for the compute backend", long_about = None)]
struct Args {
    /// Path to a TOML config file (falls back to $GATEWAY_CONFIG).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config_path = args
        .config
        .or_else(|| std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from));

    let config = config::load_config(config_path.as_deref())?;
    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        backend = %config.backend.base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
