//! Axum router construction.

use std::time::Duration;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::middleware::{auth, metrics, trace::RouteSpan};
use super::{handlers, state::AppState};

/// Route serving the metrics exposition; exempt from authentication.
pub const METRICS_PATH: &str = "/metrics";

/// Build the application [`Router`] with all routes and middleware attached.
///
/// Layers run outermost to innermost: tracing, timeout, auth, metrics.
pub fn build(state: AppState, span: RouteSpan, request_timeout: Duration) -> Router {
    Router::new()
        .route("/services", get(handlers::list_services))
        .route("/service/:id", get(handlers::get_service))
        .route(METRICS_PATH, get(handlers::metrics))
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.metrics.clone(), metrics::record_duration))
        .layer(from_fn_with_state(state.auth_store.clone(), auth::require_credentials))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http().make_span_with(span))
        .with_state(state)
}
