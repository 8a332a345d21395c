//! Data layer
//!
//! - `filters` - Composable parameterised SQL filters
//! - `sql` - Dialects and named to positional rendering
//! - `sqlite` - SQLite service and generic DAO
//! - `error` - Unified error type

pub mod error;
pub mod filters;
pub mod sql;
pub mod sqlite;

pub use error::DataError;
pub use sqlite::{Dao, Entity, SqliteDao, SqliteService};
