//! preroute: canonicalizing front controller.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────────┐
//!                      │                     PREROUTE                      │
//!                      │                                                   │
//!   Client Request     │  ┌──────────┐   ┌────────────┐   ┌─────────────┐  │
//!   ───────────────────┼─▶│   http   │──▶│  redirect  │──▶│   routing   │  │
//!                      │  │ context  │   │ php/slash/ │   │ exact-match │  │
//!                      │  │ extract  │   │ host/https │   │   table     │  │
//!                      │  └──────────┘   └─────┬──────┘   └──────┬──────┘  │
//!                      │                       │  Action         │         │
//!                      │                       ▼                 ▼         │
//!   Client Response    │  ┌──────────────────────────────────────────────┐ │
//!   ◀──────────────────┼──│ http response: 30x / 404 / rejected / file   │ │
//!                      │  └──────────────────────────────────────────────┘ │
//!                      │                                                   │
//!                      │  config · observability · lifecycle               │
//!                      └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use preroute::config::{load_config, AppConfig};
use preroute::http::HttpServer;
use preroute::lifecycle::{wait_for_signal, Shutdown};
use preroute::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "preroute")]
#[command(about = "Canonicalizing front controller with exact-match routing", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "preroute.toml")]
    config: PathBuf,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config: AppConfig = load_config(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    if cli.check {
        println!(
            "{}: ok ({} routes)",
            cli.config.display(),
            config.router.routes.len()
        );
        return Ok(());
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("preroute v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = %cli.config.display(),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
