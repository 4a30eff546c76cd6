//! Per-request credential check against an authorization store.
//!
//! Callers authenticate with HTTP basic auth (`account:token`). The gate
//! asks the store one question: does this exact pair exist? There is no
//! expiry, lockout or rotation logic here.
//!
//! # Logging invariants
//!
//! - Tokens are **never** logged, traced, or printed via `Debug`.

pub mod credentials;
pub mod store;

pub use credentials::Credentials;
pub use store::{AuthStore, SqlAuthStore, StaticAuthStore};
