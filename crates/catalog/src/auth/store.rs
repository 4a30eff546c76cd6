//! Authorization stores answering "is this account/token pair on record?".

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, Value};
use thiserror::Error;
use tracing::instrument;

use crate::repository::StoreError;

const MATCH_SQL: &str = "SELECT COUNT(1) AS matches FROM auth WHERE account = ? AND token = ?";

/// Existence check over the account → token relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Return `true` if a record with exactly this pair exists.
    async fn is_authorized(&self, account: &str, token: &str) -> Result<bool, StoreError>;
}

/// Store backed by the `auth(account, token)` table.
#[derive(Debug, Clone)]
pub struct SqlAuthStore {
    db: DatabaseConnection,
}

impl SqlAuthStore {
    /// Wrap an open connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthStore for SqlAuthStore {
    #[instrument(name = "authorize", skip(self, token))]
    async fn is_authorized(&self, account: &str, token: &str) -> Result<bool, StoreError> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            MATCH_SQL,
            [Value::from(account), Value::from(token)],
        );
        let Some(row) = self.db.query_one(stmt).await? else {
            return Ok(false);
        };
        let matches: i64 = row
            .try_get("", "matches")
            .map_err(|e| StoreError::MalformedRow(format!("column matches: {e}")))?;
        Ok(matches > 0)
    }
}

/// Error parsing a static credential list.
#[derive(Debug, Error)]
pub enum CredentialsParseError {
    /// An entry was not of the form `account:token`.
    #[error("invalid credential entry #{0}: expected account:token")]
    InvalidEntry(usize),

    /// The same account appeared twice.
    #[error("duplicate account: {0}")]
    DuplicateAccount(String),
}

/// Store over a fixed map, one active token per account.
#[derive(Clone, Default)]
pub struct StaticAuthStore {
    tokens: HashMap<String, String>,
}

impl StaticAuthStore {
    /// Build from `(account, token)` pairs; a repeated account keeps the last token.
    pub fn new<A, T>(pairs: impl IntoIterator<Item = (A, T)>) -> Self
    where
        A: Into<String>,
        T: Into<String>,
    {
        Self {
            tokens: pairs
                .into_iter()
                .map(|(a, t)| (a.into(), t.into()))
                .collect(),
        }
    }

    /// Parse `account:token[,account:token...]`. Blank input yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsParseError`] on a malformed entry or a repeated account.
    pub fn parse(list: &str) -> Result<Self, CredentialsParseError> {
        let mut tokens = HashMap::new();
        for (idx, entry) in list.split(',').map(str::trim).enumerate() {
            if entry.is_empty() {
                continue;
            }
            let (account, token) = entry
                .split_once(':')
                .filter(|(a, t)| !a.is_empty() && !t.is_empty())
                .ok_or(CredentialsParseError::InvalidEntry(idx + 1))?;
            if tokens.insert(account.to_owned(), token.to_owned()).is_some() {
                return Err(CredentialsParseError::DuplicateAccount(account.to_owned()));
            }
        }
        Ok(Self::new(tokens))
    }

    /// Number of accounts on record.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Return `true` if no accounts are on record.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Debug for StaticAuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAuthStore")
            .field("accounts", &self.tokens.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl AuthStore for StaticAuthStore {
    async fn is_authorized(&self, account: &str, token: &str) -> Result<bool, StoreError> {
        Ok(self.tokens.get(account).is_some_and(|t| t == token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::sql::tests::{memory_db, seeded_db};
    use sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn sql_store_matches_exact_pair() {
        let store = SqlAuthStore::new(seeded_db().await);
        assert!(store.is_authorized("alice", "s3cret").await.unwrap());
        assert!(!store.is_authorized("alice", "wrong").await.unwrap());
        assert!(!store.is_authorized("bob", "s3cret").await.unwrap());
        assert!(!store.is_authorized("", "").await.unwrap());
    }

    #[tokio::test]
    async fn sql_store_empty_table_denies() {
        let store = SqlAuthStore::new(memory_db().await);
        assert!(!store.is_authorized("alice", "s3cret").await.unwrap());
    }

    #[tokio::test]
    async fn sql_store_missing_table_is_error() {
        let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
        opts.max_connections(1);
        let store = SqlAuthStore::new(Database::connect(opts).await.unwrap());
        assert!(store.is_authorized("alice", "s3cret").await.is_err());
    }

    #[tokio::test]
    async fn static_store_checks_pair() {
        let store = StaticAuthStore::new([("alice", "s3cret")]);
        assert!(store.is_authorized("alice", "s3cret").await.unwrap());
        assert!(!store.is_authorized("alice", "nope").await.unwrap());
        assert!(!store.is_authorized("carol", "s3cret").await.unwrap());
    }

    #[test]
    fn parse_accepts_list() {
        let store = StaticAuthStore::parse(" alice:s3cret , bob:tok:with:colons ,").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn parsed_store_checks_pair() {
        let store = StaticAuthStore::parse("alice:s3cret,bob:hunter2").unwrap();
        assert!(store.is_authorized("bob", "hunter2").await.unwrap());
        assert!(!store.is_authorized("bob", "s3cret").await.unwrap());
    }

    #[test]
    fn parse_blank_is_empty() {
        assert!(StaticAuthStore::parse("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_bad_entries() {
        assert!(matches!(
            StaticAuthStore::parse("alice:s3cret,bob"),
            Err(CredentialsParseError::InvalidEntry(2))
        ));
        assert!(StaticAuthStore::parse(":token").is_err());
        assert!(matches!(
            StaticAuthStore::parse("a:1,a:2"),
            Err(CredentialsParseError::DuplicateAccount(_))
        ));
    }

    #[test]
    fn debug_hides_tokens() {
        let store = StaticAuthStore::new([("alice", "s3cret")]);
        assert!(!format!("{store:?}").contains("s3cret"));
    }
}
