//! Shared application state injected into every handler and middleware.

use std::sync::Arc;

use crate::auth::AuthStore;
use crate::repository::ServiceRepository;
use crate::telemetry::Metrics;

/// Application state shared across all requests.
///
/// All fields are cheaply cloneable (`Arc`-wrapped or already `Arc`-backed) so
/// that Axum can clone the state for each request.
#[derive(Clone)]
pub struct AppState {
    /// Catalog read access.
    pub repository: Arc<dyn ServiceRepository>,
    /// Account/token relation consulted by the auth gate.
    pub auth_store: Arc<dyn AuthStore>,
    /// Request metrics and their registry.
    pub metrics: Metrics,
}

impl AppState {
    /// Create a new [`AppState`] from its collaborators.
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        auth_store: Arc<dyn AuthStore>,
        metrics: Metrics,
    ) -> Self {
        Self {
            repository,
            auth_store,
            metrics,
        }
    }
}
