//! SQL dialect trait for multi-database support
//!
//! Filters carry named `:placeholders`; drivers bind positionally. A dialect
//! decides what each positional placeholder looks like.

/// SQL dialect trait for generating database-specific SQL
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Literal standing in for an empty bound list inside `IN (...)`.
    ///
    /// `x IN (NULL)` is never true, so an empty list matches no rows.
    fn empty_list(&self) -> &'static str {
        "NULL"
    }
}
