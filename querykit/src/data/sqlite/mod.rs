//! SQLite database service
//!
//! Owns the connection pool built from the database configuration and hands
//! out DAOs that execute filters against it.

mod arguments;
pub mod dao;
pub mod error;

pub use dao::{Dao, Entity, SqliteDao, count_rows};
pub use error::SqliteError;
pub use sqlx::SqlitePool;

use std::str::FromStr;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use tracing::log::LevelFilter;

use self::arguments::to_arguments;

use crate::core::config::DatabaseConfig;
use crate::data::error::DataError;
use crate::data::filters::{FilterValue, QueryFilter};

/// SQLite database service
///
/// Should be created once at startup and shared; the pool is cheap to clone.
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Open the pool described by the configuration
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DataError> {
        if !config.url.starts_with("sqlite:") {
            return Err(DataError::Config(format!(
                "Unsupported database URL '{}'. Expected a sqlite: URL",
                config.url
            )));
        }

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(DataError::from_sqlite)?
            .create_if_missing(config.create_if_missing)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(DataError::from_sqlite)?;

        tracing::debug!(url = %config.url, max_connections = config.max_connections, "SqliteService initialized");
        Ok(Self { pool })
    }

    /// Create a SqliteService from an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// DAO for an entity type sharing this service's pool
    pub fn dao<T: Entity>(&self) -> SqliteDao<T> {
        SqliteDao::new(self.pool.clone())
    }

    /// Count rows of a table matching a filter
    pub async fn count(&self, table: &str, filter: &QueryFilter) -> Result<u64, SqliteError> {
        count_rows(&self.pool, table, filter).await
    }

    /// Run a query with positional `?` parameters and return the raw rows
    pub async fn query(
        &self,
        sql: &str,
        params: Vec<FilterValue>,
    ) -> Result<Vec<SqliteRow>, SqliteError> {
        tracing::debug!(sql, params = params.len(), "Running query");
        let args = to_arguments(params)?;
        let rows = sqlx::query_with(sql, args).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Execute a statement with positional `?` parameters.
    ///
    /// Returns the rowid of the inserted row for an `INSERT` or `REPLACE`
    /// that wrote a row, `None` otherwise.
    pub async fn execute(
        &self,
        sql: &str,
        params: Vec<FilterValue>,
    ) -> Result<Option<i64>, SqliteError> {
        tracing::debug!(sql, params = params.len(), "Executing statement");
        let args = to_arguments(params)?;
        let result = sqlx::query_with(sql, args).execute(&self.pool).await?;

        let inserted = is_insert(sql) && result.rows_affected() > 0;
        Ok(inserted.then(|| result.last_insert_rowid()))
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}

fn is_insert(sql: &str) -> bool {
    let keyword = sql.split_whitespace().next().unwrap_or_default();
    keyword.eq_ignore_ascii_case("INSERT") || keyword.eq_ignore_ascii_case("REPLACE")
}
