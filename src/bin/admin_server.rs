//! Admin data server
//!
//! Serves the admin HTTP API over the local data directory.

use clap::Parser;
use soulframe_atlas::admin::{admin_router, AdminState};
use soulframe_atlas::core::config::{AtlasConfig, DEFAULT_CONFIG_FILE};
use soulframe_atlas::core::error::{AtlasError, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Admin data server for the wiki's JSON files
#[derive(Parser, Debug)]
#[command(name = "admin_server")]
#[command(about = "Serve the admin API for listing, editing and uploading wiki data files")]
struct Args {
    /// Config file (TOML)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Listen port, overrides the config file and PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("soulframe_atlas=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AtlasConfig::load_with_env(&args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = AdminState::from_config(&config);
    state.store.ensure_dirs().await?;

    if state.access.is_enabled() {
        info!("Access check enabled (header: {})", state.access.header_name());
    } else {
        warn!("Access check disabled - write endpoints are open");
    }
    info!("Data directory: {:?}", config.data.data_dir);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| AtlasError::Config(format!("Invalid server address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Admin server listening on http://{}", addr);

    axum::serve(listener, admin_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Admin server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
