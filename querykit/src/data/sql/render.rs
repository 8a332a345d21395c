//! Named to positional parameter rendering

use serde::Serialize;

use super::SqlDialect;
use crate::data::filters::{FilterError, FilterValue, QueryFilter, placeholder_spans};

/// Positional SQL and the values to bind, in placeholder order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedFilter {
    pub sql: String,
    pub values: Vec<FilterValue>,
}

/// Render a filter for the given dialect.
///
/// Scalar parameters become one placeholder each. List parameters expand to
/// one placeholder per element; an empty list renders as the dialect's empty
/// list literal and binds nothing. A list anywhere but inside `IN (...)` is
/// rejected.
pub fn render(filter: &QueryFilter, dialect: &dyn SqlDialect) -> Result<RenderedFilter, FilterError> {
    filter.validate()?;

    let source = filter.sql();
    let mut sql = String::with_capacity(source.len());
    let mut values = Vec::with_capacity(filter.params().len());
    let mut last = 0;

    for (span, name) in placeholder_spans(source) {
        sql.push_str(&source[last..span.start]);
        last = span.end;

        let value = filter
            .params()
            .get(name)
            .ok_or_else(|| FilterError::UnboundParameter {
                name: name.to_string(),
            })?;

        match value {
            FilterValue::List(_) if !in_list_position(&source[..span.start]) => {
                return Err(FilterError::UnsupportedValue {
                    name: name.to_string(),
                    kind: value.kind(),
                });
            }
            FilterValue::List(items) if items.is_empty() => sql.push_str(dialect.empty_list()),
            FilterValue::List(items) => {
                let mut placeholders = Vec::with_capacity(items.len());
                for item in items {
                    if item.is_list() {
                        return Err(FilterError::UnsupportedValue {
                            name: name.to_string(),
                            kind: item.kind(),
                        });
                    }
                    values.push(item.clone());
                    placeholders.push(dialect.placeholder(values.len()));
                }
                sql.push_str(&placeholders.join(", "));
            }
            scalar => {
                values.push(scalar.clone());
                sql.push_str(&dialect.placeholder(values.len()));
            }
        }
    }
    sql.push_str(&source[last..]);

    tracing::trace!(dialect = dialect.name(), sql = %sql, values = values.len(), "Rendered filter");
    Ok(RenderedFilter { sql, values })
}

/// True when the text before a placeholder ends with `IN (`
fn in_list_position(before: &str) -> bool {
    let Some(rest) = before.trim_end().strip_suffix('(') else {
        return false;
    };
    let rest = rest.trim_end();
    if rest.len() < 2 || !rest.is_char_boundary(rest.len() - 2) {
        return false;
    }
    let (head, keyword) = rest.split_at(rest.len() - 2);
    keyword.eq_ignore_ascii_case("IN")
        && !head
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Append the filter to a base query as a WHERE clause.
///
/// An empty filter leaves the base query untouched.
pub fn where_clause(
    base: &str,
    filter: &QueryFilter,
    dialect: &dyn SqlDialect,
) -> Result<RenderedFilter, FilterError> {
    if filter.is_empty() {
        return Ok(RenderedFilter {
            sql: base.to_string(),
            values: Vec::new(),
        });
    }

    let rendered = render(filter, dialect)?;
    Ok(RenderedFilter {
        sql: format!("{} WHERE {}", base, rendered.sql),
        values: rendered.values,
    })
}
