//! The query filter value type
//!
//! A `QueryFilter` is an SQL predicate fragment with named `:placeholder`
//! parameters and the values bound to them. Filters are immutable: combining
//! them produces new values and never touches the inputs.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::error::FilterError;
use super::group;
use super::value::FilterValue;

/// `:name` not preceded by another colon, so `::cast` is left alone
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^:]):([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder regex is valid")
});

/// Named parameter bindings of a filter
pub type FilterParams = BTreeMap<String, FilterValue>;

/// A parameterised SQL filter to be applied in a WHERE clause
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryFilter {
    sql: String,
    params: FilterParams,
}

impl QueryFilter {
    /// Create a filter from hand-written SQL and its bindings.
    ///
    /// Fails unless every placeholder has exactly one binding and every
    /// binding is referenced exactly once.
    pub fn new(sql: impl Into<String>, params: FilterParams) -> Result<Self, FilterError> {
        let filter = Self {
            sql: sql.into(),
            params,
        };
        filter.validate()?;
        Ok(filter)
    }

    /// The filter with no predicate
    pub fn empty() -> Self {
        Self::default()
    }

    /// Filter with no parameters (e.g. `col IS NULL`)
    pub(crate) fn unparameterised(sql: String) -> Self {
        Self {
            sql,
            params: FilterParams::new(),
        }
    }

    /// Filter with a single parameter
    pub(crate) fn with_param(sql: String, name: String, value: FilterValue) -> Self {
        let mut params = FilterParams::new();
        params.insert(name, value);
        Self { sql, params }
    }

    /// Assemble a filter whose parts are already known to be consistent
    pub(crate) fn from_parts(sql: String, params: FilterParams) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// True when the filter contributes no predicate
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_parts(self) -> (String, FilterParams) {
        (self.sql, self.params)
    }

    /// Placeholder names in the order they appear in the SQL
    pub fn placeholders(&self) -> Vec<&str> {
        placeholder_spans(&self.sql).map(|(_, name)| name).collect()
    }

    /// Check the placeholder/binding invariant
    pub fn validate(&self) -> Result<(), FilterError> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for name in self.placeholders() {
            if !self.params.contains_key(name) {
                return Err(FilterError::UnboundParameter {
                    name: name.to_string(),
                });
            }
            *seen.entry(name).or_default() += 1;
        }
        if let Some((name, _)) = seen.iter().find(|(_, count)| **count > 1) {
            return Err(FilterError::DuplicateParameter {
                name: name.to_string(),
            });
        }
        if let Some(name) = self.params.keys().find(|k| !seen.contains_key(k.as_str())) {
            return Err(FilterError::UnusedParameter { name: name.clone() });
        }
        Ok(())
    }

    /// AND group of this filter and another
    pub fn and(self, other: QueryFilter) -> Result<QueryFilter, FilterError> {
        group::and([self, other])
    }

    /// OR group of this filter and another
    pub fn or(self, other: QueryFilter) -> Result<QueryFilter, FilterError> {
        group::or([self, other])
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Byte range of each `:name` token (colon included) and the bare name
pub(crate) fn placeholder_spans(sql: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    PLACEHOLDER.captures_iter(sql).filter_map(|caps| {
        let name = caps.get(1)?;
        Some((name.start() - 1..name.end(), name.as_str()))
    })
}
