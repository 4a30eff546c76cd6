//! Read access to the service catalog, independent of storage technology.
//!
//! Handlers only ever see an `Arc<dyn ServiceRepository>`; the concrete
//! backend is chosen once at startup:
//!
//! - [`InMemoryRepository`]: a fixed fixture, insertion ordered.
//! - [`SqlRepository`]: rows from the `services` table via sea-orm.
//!
//! # Contract
//!
//! - Absence is `Ok(None)`, never an error. Only I/O failures and rows that
//!   cannot be decoded are errors.
//! - `get_service(id)` only ever returns a service whose `id` equals `id`.
//! - Each call opens one span named after the operation.

pub mod memory;
pub mod sql;

pub use memory::InMemoryRepository;
pub use sql::SqlRepository;

use async_trait::async_trait;
use common::Service;
use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The driver reported a failure (connection loss, bad SQL, missing table).
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// A row was returned but could not be decoded into a [`Service`].
    #[error("malformed row: {0}")]
    MalformedRow(String),
}

/// Read-only access to catalog entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Return every known service in backend-defined, stable order.
    async fn list_services(&self) -> Result<Vec<Service>, StoreError>;

    /// Return the service with `id`, or `None` if there is none.
    async fn get_service(&self, id: i64) -> Result<Option<Service>, StoreError>;
}
