//! Generic DAO over SQLite
//!
//! Entities describe their table and key; filters supply the WHERE clause.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::sqlite::{SqlitePool, SqliteRow};

use super::SqliteError;
use super::arguments::to_arguments;
use crate::data::error::DataError;
use crate::data::filters::{FilterValue, QueryFilter, column};
use crate::data::sql::{SqliteDialect, where_clause};

/// A row type persisted in a single table
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin {
    /// Table name
    const TABLE: &'static str;

    /// Primary key column
    const KEY: &'static str;

    /// Value of the primary key column
    fn key(&self) -> FilterValue;

    /// Column/value pairs to write, key column included
    fn values(&self) -> Vec<(&'static str, FilterValue)>;
}

/// Generic data access for one entity type
#[async_trait]
pub trait Dao<T>: Send + Sync {
    /// First row matching the filter, if any
    async fn fetch(&self, filter: &QueryFilter) -> Result<Option<T>, DataError>;

    /// All rows
    async fn list(&self) -> Result<Vec<T>, DataError>;

    /// Rows matching the filter; an empty filter lists everything
    async fn list_filtered(&self, filter: &QueryFilter) -> Result<Vec<T>, DataError>;

    /// Number of rows matching the filter
    async fn count(&self, filter: &QueryFilter) -> Result<u64, DataError>;

    /// Insert, or update when a row with the same key exists
    async fn save(&self, entity: &T) -> Result<(), DataError>;

    /// Delete by key. Returns true if a row was removed
    async fn delete(&self, entity: &T) -> Result<bool, DataError>;
}

/// SQLite-backed `Dao`
pub struct SqliteDao<T> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for SqliteDao<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> SqliteDao<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    async fn select(&self, filter: &QueryFilter, limit: Option<u32>) -> Result<Vec<T>, SqliteError> {
        let base = format!("SELECT * FROM {}", T::TABLE);
        let mut rendered = where_clause(&base, filter, &SqliteDialect)?;
        if let Some(limit) = limit {
            rendered.sql.push_str(&format!(" LIMIT {}", limit));
        }

        tracing::debug!(table = T::TABLE, sql = %rendered.sql, params = rendered.values.len(), "Selecting rows");
        let args = to_arguments(rendered.values)?;
        let rows = sqlx::query_as_with::<_, T, _>(&rendered.sql, args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    fn upsert_sql(values: &[(&'static str, FilterValue)]) -> String {
        let columns: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let updates: Vec<String> = columns
            .iter()
            .filter(|c| **c != T::KEY)
            .map(|c| format!("{c} = excluded.{c}"))
            .collect();

        let conflict = if updates.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", updates.join(", "))
        };

        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) {}",
            T::TABLE,
            columns.join(", "),
            placeholders,
            T::KEY,
            conflict
        )
    }
}

#[async_trait]
impl<T: Entity> Dao<T> for SqliteDao<T> {
    async fn fetch(&self, filter: &QueryFilter) -> Result<Option<T>, DataError> {
        Ok(self.select(filter, Some(1)).await?.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<T>, DataError> {
        Ok(self.select(&QueryFilter::empty(), None).await?)
    }

    async fn list_filtered(&self, filter: &QueryFilter) -> Result<Vec<T>, DataError> {
        Ok(self.select(filter, None).await?)
    }

    async fn count(&self, filter: &QueryFilter) -> Result<u64, DataError> {
        Ok(count_rows(&self.pool, T::TABLE, filter).await?)
    }

    async fn save(&self, entity: &T) -> Result<(), DataError> {
        let values = entity.values();
        let sql = Self::upsert_sql(&values);
        tracing::debug!(table = T::TABLE, sql = %sql, "Saving row");

        let args = to_arguments(values.into_iter().map(|(_, v)| v).collect())?;
        sqlx::query_with(&sql, args)
            .execute(&self.pool)
            .await
            .map_err(SqliteError::from)?;
        Ok(())
    }

    async fn delete(&self, entity: &T) -> Result<bool, DataError> {
        let filter = column(T::KEY).is_equal_to(entity.key());
        let base = format!("DELETE FROM {}", T::TABLE);
        let rendered = where_clause(&base, &filter, &SqliteDialect).map_err(SqliteError::from)?;
        tracing::debug!(table = T::TABLE, sql = %rendered.sql, "Deleting row");

        let args = to_arguments(rendered.values)?;
        let result = sqlx::query_with(&rendered.sql, args)
            .execute(&self.pool)
            .await
            .map_err(SqliteError::from)?;
        Ok(result.rows_affected() > 0)
    }
}

/// Count rows of a table matching a filter.
///
/// The table name is interpolated as is; callers validate untrusted names.
pub async fn count_rows(
    pool: &SqlitePool,
    table: &str,
    filter: &QueryFilter,
) -> Result<u64, SqliteError> {
    let base = format!("SELECT COUNT(*) FROM {}", table);
    let rendered = where_clause(&base, filter, &SqliteDialect)?;
    tracing::debug!(table, sql = %rendered.sql, params = rendered.values.len(), "Counting rows");

    let args = to_arguments(rendered.values)?;
    let count: i64 = sqlx::query_scalar_with(&rendered.sql, args)
        .fetch_one(pool)
        .await?;
    Ok(count as u64)
}
