//! Filter error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Duplicate parameter name in merged filters: {name}")]
    DuplicateParameter { name: String },

    #[error("Placeholder :{name} has no bound value")]
    UnboundParameter { name: String },

    #[error("Parameter {name} is bound but never referenced")]
    UnusedParameter { name: String },

    #[error("Cannot filter by column: {0}")]
    InvalidColumn(String),

    #[error("Invalid filter JSON: {0}")]
    InvalidJson(String),

    #[error("Filter JSON exceeds maximum size of {max} bytes")]
    TooLarge { max: usize },

    #[error("Maximum {max} filters allowed")]
    TooManyFilters { max: usize },

    #[error("Filter nesting exceeds maximum depth of {max}")]
    TooDeep { max: usize },

    #[error("Unsupported {kind} value for parameter {name}")]
    UnsupportedValue { name: String, kind: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_parameter_display() {
        let err = FilterError::DuplicateParameter {
            name: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate parameter name in merged filters: abc");
    }

    #[test]
    fn test_unbound_parameter_display() {
        let err = FilterError::UnboundParameter {
            name: "xyz".to_string(),
        };
        assert_eq!(err.to_string(), "Placeholder :xyz has no bound value");
    }

    #[test]
    fn test_limit_errors_display() {
        assert_eq!(
            FilterError::TooLarge { max: 65536 }.to_string(),
            "Filter JSON exceeds maximum size of 65536 bytes"
        );
        assert_eq!(
            FilterError::TooManyFilters { max: 50 }.to_string(),
            "Maximum 50 filters allowed"
        );
    }
}
