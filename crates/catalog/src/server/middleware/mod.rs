//! Request interceptors composed by the router.
//!
//! Each interceptor does its work and then calls the next one. Outermost to
//! innermost: [`trace`] → timeout → [`auth`] → [`metrics`] → handler.

pub mod auth;
pub mod metrics;
pub mod trace;

use std::time::Duration;

use axum::{extract::MatchedPath, http::Request};

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Route label used when no route matched (fallback).
pub const UNMATCHED_ROUTE: &str = "<unmatched>";

/// The matched route template (e.g. `/service/:id`), never the literal path.
pub fn route_template<B>(request: &Request<B>) -> &str {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_ROUTE, MatchedPath::as_str)
}
