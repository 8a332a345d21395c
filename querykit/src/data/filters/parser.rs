//! Filter parsing
//!
//! Parses a JSON filter tree into a composed `QueryFilter` with validation.
//!
//! ```json
//! {"op": "and", "filters": [
//!     {"op": "=", "column": "name", "value": "test"},
//!     {"op": "or", "filters": [
//!         {"op": "in", "column": "site", "values": ["mailer", "auth"]},
//!         {"op": "is null", "column": "site"}
//!     ]}
//! ]}
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::column::ColumnFilter;
use super::error::FilterError;
use super::group;
use super::types::QueryFilter;
use super::value::FilterValue;

/// Maximum size of filter JSON in bytes (64KB)
const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

/// Maximum number of leaf predicates allowed
const MAX_FILTERS: usize = 50;

/// Maximum nesting of and/or groups
const MAX_DEPTH: usize = 16;

/// Plain or table-qualified identifier
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("identifier regex is valid")
});

/// A filter tree as accepted from user input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op")]
pub enum FilterSpec {
    #[serde(rename = "and")]
    And { filters: Vec<FilterSpec> },
    #[serde(rename = "or")]
    Or { filters: Vec<FilterSpec> },
    #[serde(rename = "=")]
    Eq { column: String, value: FilterValue },
    #[serde(rename = "!=")]
    Ne { column: String, value: FilterValue },
    #[serde(rename = "like")]
    Like { column: String, value: String },
    #[serde(rename = ">")]
    Gt { column: String, value: FilterValue },
    #[serde(rename = "<")]
    Lt { column: String, value: FilterValue },
    #[serde(rename = ">=")]
    Gte { column: String, value: FilterValue },
    #[serde(rename = "<=")]
    Lte { column: String, value: FilterValue },
    #[serde(rename = "in")]
    In {
        column: String,
        values: Vec<FilterValue>,
    },
    #[serde(rename = "is null")]
    IsNull { column: String },
    #[serde(rename = "is not null")]
    IsNotNull { column: String },
}

impl FilterSpec {
    /// Number of leaf predicates in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::And { filters } | Self::Or { filters } => {
                filters.iter().map(FilterSpec::leaf_count).sum()
            }
            _ => 1,
        }
    }

    /// Nesting depth; a leaf has depth 0
    pub fn depth(&self) -> usize {
        match self {
            Self::And { filters } | Self::Or { filters } => {
                1 + filters.iter().map(FilterSpec::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Validate column names and value shapes in the tree
    pub fn validate(&self) -> Result<(), FilterError> {
        match self {
            Self::And { filters } | Self::Or { filters } => {
                filters.iter().try_for_each(FilterSpec::validate)
            }
            Self::Eq { column, value }
            | Self::Ne { column, value }
            | Self::Gt { column, value }
            | Self::Lt { column, value }
            | Self::Gte { column, value }
            | Self::Lte { column, value } => {
                validate_identifier(column)?;
                require_scalar(column, value)
            }
            Self::In { column, values } => {
                validate_identifier(column)?;
                values.iter().try_for_each(|v| require_scalar(column, v))
            }
            Self::Like { column, .. } | Self::IsNull { column } | Self::IsNotNull { column } => {
                validate_identifier(column)
            }
        }
    }

    /// Build the composed filter
    pub fn to_filter(&self) -> Result<QueryFilter, FilterError> {
        let filter = match self {
            Self::And { filters } => group::and(
                filters
                    .iter()
                    .map(FilterSpec::to_filter)
                    .collect::<Result<Vec<_>, _>>()?,
            )?,
            Self::Or { filters } => group::or(
                filters
                    .iter()
                    .map(FilterSpec::to_filter)
                    .collect::<Result<Vec<_>, _>>()?,
            )?,
            Self::Eq { column, value } => ColumnFilter::new(column).is_equal_to(value.clone()),
            Self::Ne { column, value } => ColumnFilter::new(column).is_not_equal_to(value.clone()),
            Self::Like { column, value } => ColumnFilter::new(column).is_like(value.clone()),
            Self::Gt { column, value } => ColumnFilter::new(column).is_greater_than(value.clone()),
            Self::Lt { column, value } => ColumnFilter::new(column).is_less_than(value.clone()),
            Self::Gte { column, value } => {
                ColumnFilter::new(column).is_greater_than_or_equal_to(value.clone())
            }
            Self::Lte { column, value } => {
                ColumnFilter::new(column).is_less_than_or_equal_to(value.clone())
            }
            Self::In { column, values } => ColumnFilter::new(column).is_in(values.iter().cloned()),
            Self::IsNull { column } => ColumnFilter::new(column).is_null(),
            Self::IsNotNull { column } => ColumnFilter::new(column).is_not_null(),
        };
        Ok(filter)
    }
}

/// Check that a column or table name is a plain (optionally qualified) identifier
pub fn validate_identifier(name: &str) -> Result<(), FilterError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(FilterError::InvalidColumn(name.to_string()))
    }
}

fn require_scalar(column: &str, value: &FilterValue) -> Result<(), FilterError> {
    if value.is_list() {
        return Err(FilterError::UnsupportedValue {
            name: column.to_string(),
            kind: value.kind(),
        });
    }
    Ok(())
}

/// Parse a filter tree from JSON without building it
///
/// Validates JSON size, structure, limits and column names.
pub fn parse_filter_spec(json_str: &str) -> Result<FilterSpec, FilterError> {
    if json_str.len() > MAX_FILTER_JSON_SIZE {
        return Err(FilterError::TooLarge {
            max: MAX_FILTER_JSON_SIZE,
        });
    }

    let spec: FilterSpec =
        serde_json::from_str(json_str).map_err(|e| FilterError::InvalidJson(e.to_string()))?;

    if spec.leaf_count() > MAX_FILTERS {
        return Err(FilterError::TooManyFilters { max: MAX_FILTERS });
    }
    if spec.depth() > MAX_DEPTH {
        return Err(FilterError::TooDeep { max: MAX_DEPTH });
    }

    spec.validate()?;
    Ok(spec)
}

/// Parse a filter tree from JSON and build the composed filter
pub fn parse_filter(json_str: &str) -> Result<QueryFilter, FilterError> {
    let spec = parse_filter_spec(json_str)?;
    let filter = spec.to_filter()?;
    tracing::debug!(
        predicates = spec.leaf_count(),
        params = filter.params().len(),
        "Parsed filter"
    );
    Ok(filter)
}
