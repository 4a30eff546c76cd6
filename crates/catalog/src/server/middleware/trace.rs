//! One span per inbound request, named by route.

use std::sync::Arc;

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

use super::route_template;

/// [`MakeSpan`] that opens an `INFO` `request` span per request.
///
/// `otel.name` is set to `"<METHOD> <route>"` so exported spans are named by
/// route template. Everything downstream runs inside this span.
#[derive(Debug, Clone)]
pub struct RouteSpan {
    service: Arc<str>,
}

impl RouteSpan {
    /// Create a span factory tagging every span with `service`.
    pub fn new(service: impl Into<Arc<str>>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl<B> MakeSpan<B> for RouteSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let method = request.method();
        let route = route_template(request);
        tracing::info_span!(
            "request",
            service = %self.service,
            http.method = %method,
            http.route = route,
            otel.name = %format!("{method} {route}"),
        )
    }
}

