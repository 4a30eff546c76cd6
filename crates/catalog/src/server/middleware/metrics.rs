//! Request duration recording keyed by route template.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::route_template;
use crate::telemetry::Metrics;

/// Axum middleware timing the downstream call.
///
/// The timer observes when dropped, so a duration is recorded on every exit
/// path, including a downstream future that is cancelled mid-flight.
pub async fn record_duration(
    State(metrics): State<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let _timer = metrics.start_timer(request.method().as_str(), route_template(&request));
    next.run(request).await
}
