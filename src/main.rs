use std::sync::Arc;

use anyhow::{Context, Result};
use bookstore::{
    AppState, DocumentStore, InMemoryStore, SnapshotStore, build_router,
    config::{AppConfig, StoreBackend},
    seed::seed_if_empty,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse();
    init_tracing(&config)?;

    let store: Arc<dyn DocumentStore> = match config.backend() {
        StoreBackend::Memory => {
            info!("document store: in-memory");
            Arc::new(InMemoryStore::new())
        }
        StoreBackend::Snapshot(dir) => {
            info!(data_dir = %dir.display(), "document store: snapshot");
            let store = SnapshotStore::open(&dir)
                .await
                .with_context(|| format!("failed to open snapshot store in {}", dir.display()))?;
            Arc::new(store)
        }
    };

    if !config.no_seed {
        seed_if_empty(store.as_ref())
            .await
            .context("failed to seed sample books")?;
    }

    let app = build_router(AppState::new(store));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "bookstore started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config
            .env_filter()
            .with_context(|| format!("invalid log filter {:?}", config.log_filter))?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

/// Resolves once the process is asked to stop (Ctrl+C, or SIGTERM on unix).
async fn shutdown_signal() {
    let signal = wait_for_signal().await;
    info!(signal, "shutting down, draining in-flight requests");
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(err) => {
            warn!(error = %err, "SIGTERM handler unavailable, listening for Ctrl+C only");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        name = ctrl_c() => name,
        _ = sigterm.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
