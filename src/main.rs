//! User Service (v1)
//!
//! Serves users over HTTP and, when enabled, enriches each lookup with the
//! user's points total from the points service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────────┐
//!                        │                   USER SERVICE                     │
//!                        │                                                    │
//!   GET /users/{id}      │  ┌─────────┐   ┌──────────┐   ┌──────────────┐    │
//!   ─────────────────────┼─▶│  http   │──▶│  fault   │──▶│ user service │    │
//!                        │  │ server  │   │   gate   │   │   + store    │    │
//!                        │  └─────────┘   └──────────┘   └──────┬───────┘    │
//!                        │                                      │            │
//!                        │                                      ▼            │
//!   Response             │  ┌─────────┐                  ┌──────────────┐    │      Points
//!   ◀────────────────────┼──│composite│◀─────────────────│points client │◀───┼───── Service
//!                        │  │response │   (fail-soft)    │  + timeout   │    │
//!                        │  └─────────┘                  └──────────────┘    │
//!                        │                                                    │
//!                        │   config · observability · lifecycle               │
//!                        └───────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use user_service::config::resolve_config;
use user_service::http::HttpServer;
use user_service::lifecycle::{build_state, signals, Shutdown};
use user_service::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User lookup service with points enrichment", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "USER_SERVICE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("user-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        fault_denominator = config.faults.denominator,
        points_enabled = config.points.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let state = build_state(&config)?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(&config.server, state);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
