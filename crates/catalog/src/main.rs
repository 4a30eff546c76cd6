//! `catalog-svc` — service catalog binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP spans).
//! 3. Open the selected backend and build the repository and auth store.
//! 4. Build the Axum router and serve until Ctrl-C / SIGTERM.

mod auth;
mod config;
mod repository;
mod server;
mod telemetry;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use auth::{AuthStore, SqlAuthStore, StaticAuthStore};
use crate::config::{Config, RepositoryBackend};
use repository::{InMemoryRepository, ServiceRepository, SqlRepository};
use server::{middleware::trace::RouteSpan, state::AppState};
use telemetry::Metrics;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otlp_endpoint(), &cfg.log_level, &cfg.service_name)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.listen_port,
        backend = ?cfg.repository_backend,
        "catalog-svc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Storage
    // -----------------------------------------------------------------------
    let (repository, auth_store) = open_backend(&cfg).await?;

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let metrics = Metrics::new().context("failed to register request metrics")?;
    let state = AppState::new(repository, auth_store, metrics);
    let router = server::router::build(
        state,
        RouteSpan::new(cfg.service_name.as_str()),
        Duration::from_secs(cfg.request_timeout_secs),
    );

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    finish_serving(served, telemetry::shutdown_telemetry).context("HTTP server failed")
}

/// Log how serving ended and run `shutdown` on every outcome.
fn finish_serving<E: std::fmt::Display>(
    served: Result<(), E>,
    shutdown: impl FnOnce(),
) -> Result<(), E> {
    match &served {
        Ok(()) => info!("catalog-svc stopped"),
        Err(e) => error!(error = %e, "server terminated with an error"),
    }
    shutdown();
    served
}

async fn open_backend(
    cfg: &Config,
) -> Result<(Arc<dyn ServiceRepository>, Arc<dyn AuthStore>)> {
    match cfg.repository_backend {
        RepositoryBackend::Sqlite => {
            let db = repository::sql::connect(&cfg.database_url).await?;
            Ok((
                Arc::new(SqlRepository::new(db.clone())),
                Arc::new(SqlAuthStore::new(db)),
            ))
        }
        RepositoryBackend::Memory => {
            let store = StaticAuthStore::parse(&cfg.static_credentials)
                .context("STATIC_CREDENTIALS is invalid")?;
            if store.is_empty() {
                anyhow::bail!("STATIC_CREDENTIALS contains no accounts");
            }
            info!(accounts = store.len(), "using in-memory catalog");
            Ok((Arc::new(InMemoryRepository::seeded()), Arc::new(store)))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn shutdown_runs_when_serving_fails() {
        let flushed = Cell::new(false);
        let served: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "accept failed"));
        let result = finish_serving(served, || flushed.set(true));
        assert!(result.is_err());
        assert!(flushed.get());
    }

    #[test]
    fn shutdown_runs_on_clean_exit() {
        let flushed = Cell::new(false);
        let result = finish_serving(Ok::<(), std::io::Error>(()), || flushed.set(true));
        assert!(result.is_ok());
        assert!(flushed.get());
    }
}
