//! SQL-backed repository over the `services` table.
//!
//! Expected shape:
//! `services(id INTEGER PRIMARY KEY, name TEXT, description TEXT, versions INTEGER)`.
//! The schema itself is owned by whoever provisions the database.

use anyhow::{Context, Result};
use async_trait::async_trait;
use common::Service;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, QueryResult, Statement,
};
use tracing::{debug, instrument};

use super::{ServiceRepository, StoreError};

const LIST_SQL: &str = "SELECT id, name, description, versions FROM services ORDER BY id";
const GET_SQL: &str = "SELECT id, name, description, versions FROM services WHERE id = ?";

/// Open a pooled connection to `url` (e.g. `sqlite://services.db?mode=ro`).
///
/// # Errors
///
/// Returns an error if the database cannot be reached or opened.
pub async fn connect(url: &str) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.sqlx_logging(false);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to open database at {url}"))
}

/// Repository reading rows through a sea-orm connection.
#[derive(Debug, Clone)]
pub struct SqlRepository {
    db: DatabaseConnection,
}

impl SqlRepository {
    /// Wrap an open connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(&self, sql: &str, values: Vec<sea_orm::Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }
}

#[async_trait]
impl ServiceRepository for SqlRepository {
    #[instrument(name = "list_services", skip(self))]
    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        let rows = self.db.query_all(self.statement(LIST_SQL, vec![])).await?;
        rows.iter().map(decode_row).collect()
    }

    #[instrument(name = "get_service", skip(self))]
    async fn get_service(&self, id: i64) -> Result<Option<Service>, StoreError> {
        let row = self
            .db
            .query_one(self.statement(GET_SQL, vec![id.into()]))
            .await?;

        match row {
            Some(row) => decode_row(&row).map(Some),
            None => {
                debug!(id, "service id not found");
                Ok(None)
            }
        }
    }
}

/// Decode one `services` row, enforcing the [`Service`] invariants.
fn decode_row(row: &QueryResult) -> Result<Service, StoreError> {
    let id: i64 = column(row, "id")?;
    let name: String = column(row, "name")?;
    let description: String = column(row, "description")?;
    let versions: i64 = column(row, "versions")?;

    if id <= 0 {
        return Err(StoreError::MalformedRow(format!("non-positive id {id}")));
    }
    if name.is_empty() {
        return Err(StoreError::MalformedRow(format!("empty name for id {id}")));
    }
    let versions = u32::try_from(versions).map_err(|_| {
        StoreError::MalformedRow(format!("versions out of range for id {id}: {versions}"))
    })?;

    Ok(Service {
        id,
        name,
        description,
        versions,
    })
}

fn column<T: sea_orm::TryGetable>(row: &QueryResult, name: &str) -> Result<T, StoreError> {
    row.try_get("", name)
        .map_err(|e| StoreError::MalformedRow(format!("column {name}: {e}")))
}
