//! AND/OR filter combinators
//!
//! Each call produces at most one level of parentheses; nesting calls nests
//! the groups, so arbitrary AND/OR trees compose without an expression tree.

use std::collections::btree_map::Entry;
use std::fmt;

use super::error::FilterError;
use super::types::{FilterParams, QueryFilter};

/// Logical operator joining the members of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOp {
    And,
    Or,
}

impl GroupOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            GroupOp::And => "AND",
            GroupOp::Or => "OR",
        }
    }
}

impl fmt::Display for GroupOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// The filter with no predicate; identity for both `and` and `or`
pub fn empty() -> QueryFilter {
    QueryFilter::empty()
}

/// Filters that should all evaluate to true
pub fn and<I>(filters: I) -> Result<QueryFilter, FilterError>
where
    I: IntoIterator<Item = QueryFilter>,
{
    group(GroupOp::And, filters)
}

/// Filters of which at least one should evaluate to true
pub fn or<I>(filters: I) -> Result<QueryFilter, FilterError>
where
    I: IntoIterator<Item = QueryFilter>,
{
    group(GroupOp::Or, filters)
}

/// Combine filters under an operator.
///
/// Empty filters are dropped. A single survivor is returned as is; two or
/// more are joined and wrapped in one pair of parentheses. Fails if two
/// survivors bind the same parameter name.
pub fn group<I>(op: GroupOp, filters: I) -> Result<QueryFilter, FilterError>
where
    I: IntoIterator<Item = QueryFilter>,
{
    let mut survivors: Vec<QueryFilter> = filters.into_iter().filter(|f| !f.is_empty()).collect();

    match survivors.len() {
        0 => Ok(QueryFilter::empty()),
        1 => Ok(survivors.remove(0)),
        n => {
            let mut clauses = Vec::with_capacity(n);
            let mut params = FilterParams::new();
            for filter in survivors {
                let (sql, filter_params) = filter.into_parts();
                clauses.push(sql);
                merge_params(&mut params, filter_params)?;
            }

            let sql = format!("({})", clauses.join(&format!(" {} ", op)));
            tracing::trace!(op = %op, members = n, params = params.len(), "Combined filters");
            Ok(QueryFilter::from_parts(sql, params))
        }
    }
}

fn merge_params(into: &mut FilterParams, from: FilterParams) -> Result<(), FilterError> {
    for (name, value) in from {
        match into.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(slot) => {
                return Err(FilterError::DuplicateParameter {
                    name: slot.key().clone(),
                });
            }
        }
    }
    Ok(())
}
