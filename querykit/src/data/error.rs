//! Unified error type for data layer
//!
//! Wraps backend and filter errors so callers of the DAO traits do not
//! depend on a specific backend.

use thiserror::Error;

use crate::data::filters::FilterError;
use crate::data::sqlite::SqliteError;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// Filter could not be built or rendered
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// Create a SQLite error with preserved context
    pub fn from_sqlite(e: sqlx::Error) -> Self {
        Self::Sqlite(e)
    }

    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            Self::Filter(_) | Self::Config(_) => false,
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Filter(_) | Self::Config(_) => "unknown",
        }
    }
}

/// Convert from the existing SqliteError type
impl From<SqliteError> for DataError {
    fn from(e: SqliteError) -> Self {
        match e {
            SqliteError::Database(e) => Self::Sqlite(e),
            SqliteError::Filter(e) => Self::Filter(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_display() {
        let err = DataError::from(FilterError::DuplicateParameter {
            name: "abc".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Filter error: Duplicate parameter name in merged filters: abc"
        );
    }

    #[test]
    fn test_from_sqlite_error() {
        let err = DataError::from(SqliteError::Database(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, DataError::Sqlite(sqlx::Error::PoolTimedOut)));
        assert_eq!(err.backend(), "sqlite");

        let err = DataError::from(SqliteError::Filter(FilterError::TooDeep { max: 16 }));
        assert!(matches!(err, DataError::Filter(FilterError::TooDeep { max: 16 })));
    }

    #[test]
    fn test_is_transient() {
        assert!(DataError::from_sqlite(sqlx::Error::PoolTimedOut).is_transient());
        assert!(DataError::from_sqlite(sqlx::Error::PoolClosed).is_transient());
        assert!(!DataError::from_sqlite(sqlx::Error::RowNotFound).is_transient());
        assert!(!DataError::Config("bad config".into()).is_transient());
    }

    #[test]
    fn test_backend_method() {
        assert_eq!(DataError::Config("x".into()).backend(), "unknown");
    }
}
