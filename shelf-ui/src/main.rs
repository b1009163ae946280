//! shelf-ui - Reading-preference wizard service
//!
//! Serves the wizard over HTTP and forwards searches and the final profile to
//! the recommendation service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use shelf_common::config::{default_config_path, load_toml_config, ResolvedConfig, TomlConfig};
use shelf_common::events::EventBus;
use shelf_ui::{build_router, AppState};
use shelf_wizard::HttpShelfClient;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for shelf-ui
#[derive(Parser, Debug)]
#[command(name = "shelf-ui")]
#[command(about = "Reading-preference wizard service")]
#[command(version)]
struct Args {
    /// Base URL of the recommendation service (overrides SHELF_SERVICE_URL and
    /// the config file)
    #[arg(long)]
    service_url: Option<String>,

    /// Address to listen on, e.g. 127.0.0.1:5780
    #[arg(short, long)]
    bind: Option<String>,

    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().or_else(default_config_path);
    let toml_config = match &config_path {
        Some(path) => load_toml_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => TomlConfig::default(),
    };

    let config = ResolvedConfig::resolve(args.service_url, args.bind, &toml_config)
        .context("Invalid configuration")?;

    // Initialize tracing
    let default_filter = format!(
        "shelf_ui={level},shelf_wizard={level},shelf_common={level},tower_http={level}",
        level = config.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Shelfwise wizard (shelf-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );
    if let Some(path) = &config_path {
        info!("Config file: {}", path.display());
    }
    info!("Recommendation service: {}", config.service_url);

    let client = Arc::new(
        HttpShelfClient::new(config.service_url.clone(), config.request_timeout)
            .context("Failed to build HTTP client")?,
    );

    let state = AppState::new(client.clone(), client, EventBus::new(256));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("shelf-ui listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
