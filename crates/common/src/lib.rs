//! Common types and errors shared across the service catalog crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
pub use protocol::Service;
