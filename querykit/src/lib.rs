//! Composable, parameterised SQL filters
//!
//! Build predicates with [`data::filters::column`], combine them with
//! [`data::filters::and`] / [`data::filters::or`], then render them for a
//! dialect with [`data::sql::render`] or run them through a
//! [`data::sqlite::SqliteDao`].

mod app;
pub mod core;
pub mod data;
