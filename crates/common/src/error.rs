//! Common error types shared across crates.

use thiserror::Error;

/// Request-level error taxonomy.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::ClientError`] → 400
/// - [`ServiceError::AuthRejected`] → 403
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::StoreFailure`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed, e.g. a non-integer service id.
    #[error("bad request: {0}")]
    ClientError(String),

    /// No matching credential pair was presented.
    #[error("forbidden")]
    AuthRejected,

    /// A well-formed lookup matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing store failed. The detail stays server-side.
    #[error("store failure: {0}")]
    StoreFailure(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::ClientError(_) => 400,
            ServiceError::AuthRejected => 403,
            ServiceError::NotFound(_) => 404,
            ServiceError::StoreFailure(_) => 500,
        }
    }

    /// Body text safe to expose to callers.
    ///
    /// Store failures are opaque; every other variant carries its own message.
    pub fn public_message(&self) -> &str {
        match self {
            ServiceError::ClientError(msg) | ServiceError::NotFound(msg) => msg,
            ServiceError::AuthRejected => "Forbidden",
            ServiceError::StoreFailure(_) => "Badness",
        }
    }
}
