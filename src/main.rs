//! wa-relay server.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                  WA-RELAY                    │
//!     Browser           │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ──────────────────┼─▶│  http   │───▶│  relay   │───▶│upstream │──┼──▶ Messaging
//!                       │  │ server  │    │ handlers │    │ client  │  │    gateway
//!     ◀─────────────────┼──│         │◀───│ (mask)   │◀───│         │◀─┼───
//!                       │  └─────────┘    └──────────┘    └─────────┘  │
//!                       │  ┌────────────────────────────────────────┐  │
//!                       │  │ config · observability · lifecycle     │  │
//!                       │  └────────────────────────────────────────┘  │
//!                       └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use wa_relay::config::{load_config, validation::validate_config, ConfigError, RelayConfig};
use wa_relay::lifecycle::{wait_for_signal, Shutdown};
use wa_relay::observability::{logging, metrics};
use wa_relay::HttpServer;

#[derive(Parser)]
#[command(name = "wa-relay")]
#[command(about = "Web form and relay for a WhatsApp gateway API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:8080).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("wa-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        settings_base_url = %config.upstream.settings_base_url,
        api_base_url = %config.upstream.api_base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already checked by validation.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Server running");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
