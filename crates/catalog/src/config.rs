//! Configuration loading and validation for the catalog service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any variable is invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::server::middleware::REQUEST_TIMEOUT;

/// Which storage backs the catalog and the credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryBackend {
    /// `services` and `auth` tables in the database at `DATABASE_URL`.
    Sqlite,
    /// Seeded fixture plus `STATIC_CREDENTIALS`.
    Memory,
}

/// Validated catalog service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Storage backend selection.
    #[serde(default = "default_repository_backend")]
    pub repository_backend: RepositoryBackend,

    /// sea-orm connection URL. Used by the `sqlite` backend.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// `account:token[,account:token...]`. **Required** for the `memory` backend.
    #[serde(default)]
    pub static_credentials: String,

    /// Service name stamped on spans and the OTEL resource.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// OTLP gRPC endpoint for span export. Empty disables export.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_repository_backend() -> RepositoryBackend {
    RepositoryBackend::Sqlite
}
fn default_database_url() -> String {
    "sqlite://services.db?mode=ro".into()
}
fn default_service_name() -> String {
    "services".into()
}
fn default_request_timeout() -> u64 {
    REQUEST_TIMEOUT.as_secs()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The OTLP endpoint, if span export is enabled.
    pub fn otlp_endpoint(&self) -> Option<&str> {
        let endpoint = self.otel_exporter_otlp_endpoint.trim();
        (!endpoint.is_empty()).then_some(endpoint)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.service_name, "SERVICE_NAME")?;

        match self.repository_backend {
            RepositoryBackend::Sqlite => ensure_non_empty(&self.database_url, "DATABASE_URL")?,
            RepositoryBackend::Memory => {
                ensure_non_empty(&self.static_credentials, "STATIC_CREDENTIALS")?
            }
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
