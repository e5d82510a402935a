mod config;
mod errors;
mod ingest;
mod metrics;
mod model;
mod rest;
mod store;
mod validate;

use anyhow::Context;
use config::Config;
use rest::AppState;
use std::sync::Arc;
use store::DynamoStore;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting IoT Rule Receiver v{}", env!("CARGO_PKG_VERSION"));
    info!("Region: {}, table: {}", config.aws_region, config.table_name);
    info!("HTTP server: {}", config.http_addr);
    if config.strict_validation {
        info!("Strict validation enabled");
    }

    metrics::init_metrics().context("Failed to register metrics")?;

    let store = DynamoStore::connect(&config.aws_region, &config.table_name).await;
    let state = AppState {
        store: Arc::new(store),
        strict_validation: config.strict_validation,
    };

    serve(&config.http_addr, state)
        .await
        .with_context(|| format!("HTTP server on {} failed", config.http_addr))?;

    info!("Shutting down");
    Ok(())
}

async fn serve(addr: &str, state: AppState) -> errors::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, rest::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received terminate signal"),
    }
}
