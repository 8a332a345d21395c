//! SQLite error types

use thiserror::Error;

use crate::data::filters::FilterError;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_from() {
        let err: SqliteError = FilterError::UnboundParameter {
            name: "abc".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Filter error: Placeholder :abc has no bound value"
        );
    }

    #[test]
    fn test_database_error_from() {
        let err: SqliteError = sqlx::Error::RowNotFound.into();
        assert!(err.to_string().starts_with("Database error:"));
        assert!(matches!(err, SqliteError::Database(sqlx::Error::RowNotFound)));
    }
}
