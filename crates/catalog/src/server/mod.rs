//! Axum HTTP server: routing, middleware, and handlers.
//!
//! # Responsibilities
//! - Define the route table and compose the middleware chain in a fixed order.
//! - Translate requests into repository calls and serialize the results.
//! - Inject shared application state (`AppState`) into handlers and middleware.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
