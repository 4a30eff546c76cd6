//! Logging, tracing export, and request metrics.
//!
//! Spans are exported via OTLP/gRPC when an endpoint is configured; logs are
//! always written to stdout as JSON. Request durations are kept in a
//! Prometheus registry owned by [`Metrics`] and exposed at `/metrics`.
//!
//! # Telemetry invariants
//!
//! - **No tokens** may appear in any span attribute, metric label, or log field.
//! - Metric labels use route templates, not literal paths.

pub mod init;
pub mod metrics;

pub use init::{init_telemetry, shutdown_telemetry};
pub use metrics::Metrics;
