//! Binding filter values as SQLite arguments

use sqlx::Arguments;
use sqlx::sqlite::SqliteArguments;

use super::SqliteError;
use crate::data::filters::{FilterError, FilterValue};

/// Convert rendered positional values into SQLite arguments.
///
/// Lists must already be expanded by the renderer.
pub(crate) fn to_arguments<'q>(values: Vec<FilterValue>) -> Result<SqliteArguments<'q>, SqliteError> {
    let mut args = SqliteArguments::default();
    for (index, value) in values.into_iter().enumerate() {
        let added = match value {
            FilterValue::Null => args.add(None::<String>),
            FilterValue::Bool(v) => args.add(v),
            FilterValue::Int(v) => args.add(v),
            FilterValue::Float(v) => args.add(v),
            FilterValue::Text(v) => args.add(v),
            FilterValue::List(_) => {
                return Err(FilterError::UnsupportedValue {
                    name: format!("${}", index + 1),
                    kind: "list",
                }
                .into());
            }
        };
        added.map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
