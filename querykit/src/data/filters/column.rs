//! Column comparison builder
//!
//! `column("name").is_equal_to("test")` yields `name = :<id>` with the value
//! bound under a freshly generated parameter name.

use super::param_id::unique_parameter_id;
use super::types::QueryFilter;
use super::value::FilterValue;

/// Start building a filter against the given column
pub fn column(name: impl Into<String>) -> ColumnFilter {
    ColumnFilter::new(name)
}

/// Builds leaf filters for a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    name: String,
}

impl ColumnFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in the column that are null
    pub fn is_null(&self) -> QueryFilter {
        QueryFilter::unparameterised(format!("{} IS NULL", self.name))
    }

    /// Values in the column that are not null
    pub fn is_not_null(&self) -> QueryFilter {
        QueryFilter::unparameterised(format!("{} IS NOT NULL", self.name))
    }

    /// Values contained in the given sequence.
    ///
    /// The whole sequence is bound to one parameter, even when empty.
    pub fn is_in<I, V>(&self, values: I) -> QueryFilter
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        let values = FilterValue::List(values.into_iter().map(Into::into).collect());
        let id = unique_parameter_id();
        QueryFilter::with_param(format!("{} IN (:{})", self.name, id), id, values)
    }

    pub fn is_equal_to(&self, value: impl Into<FilterValue>) -> QueryFilter {
        self.compare("=", value.into())
    }

    pub fn is_not_equal_to(&self, value: impl Into<FilterValue>) -> QueryFilter {
        self.compare("!=", value.into())
    }

    /// SQL `LIKE` against a pattern; wildcards in the pattern are not escaped
    pub fn is_like(&self, pattern: impl Into<String>) -> QueryFilter {
        self.compare("LIKE", FilterValue::Text(pattern.into()))
    }

    pub fn is_greater_than(&self, value: impl Into<FilterValue>) -> QueryFilter {
        self.compare(">", value.into())
    }

    pub fn is_less_than(&self, value: impl Into<FilterValue>) -> QueryFilter {
        self.compare("<", value.into())
    }

    pub fn is_greater_than_or_equal_to(&self, value: impl Into<FilterValue>) -> QueryFilter {
        self.compare(">=", value.into())
    }

    pub fn is_less_than_or_equal_to(&self, value: impl Into<FilterValue>) -> QueryFilter {
        self.compare("<=", value.into())
    }

    fn compare(&self, op: &str, value: FilterValue) -> QueryFilter {
        let id = unique_parameter_id();
        QueryFilter::with_param(format!("{} {} :{}", self.name, op, id), id, value)
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    fn assert_matches(pattern: &str, sql: &str) {
        let re = Regex::new(&format!("^{}$", pattern)).unwrap();
        assert!(re.is_match(sql), "{:?} does not match {:?}", sql, pattern);
    }

    fn only_param(filter: &QueryFilter) -> &FilterValue {
        let keys = filter.placeholders();
        assert_eq!(keys.len(), 1);
        assert_eq!(filter.params().len(), 1);
        &filter.params()[keys[0]]
    }

    #[test]
    fn test_is_equal_to() {
        let filter = column("name").is_equal_to("test");
        assert_matches("name = :[a-zA-Z]{32}", filter.sql());
        assert_eq!(only_param(&filter), &FilterValue::from("test"));
    }

    #[test]
    fn test_comparison_operators() {
        let cases = [
            (column("value").is_not_equal_to(12), "!="),
            (column("value").is_greater_than(12), ">"),
            (column("value").is_less_than(12), "<"),
            (column("value").is_greater_than_or_equal_to(12), ">="),
            (column("value").is_less_than_or_equal_to(12), "<="),
        ];

        for (filter, op) in cases {
            assert_matches(&format!("value {} :[a-zA-Z]{{32}}", op), filter.sql());
            assert_eq!(only_param(&filter), &FilterValue::Int(12));
        }
    }

    #[test]
    fn test_is_like() {
        let filter = column("email").is_like("%@example.com");
        assert_matches("email LIKE :[a-zA-Z]{32}", filter.sql());
        assert_eq!(only_param(&filter), &FilterValue::from("%@example.com"));
    }

    #[test]
    fn test_null_checks_have_no_params() {
        let filter = column("deleted_at").is_null();
        assert_eq!(filter.sql(), "deleted_at IS NULL");
        assert!(filter.params().is_empty());

        let filter = column("verified_at").is_not_null();
        assert_eq!(filter.sql(), "verified_at IS NOT NULL");
        assert!(filter.params().is_empty());
    }

    #[test]
    fn test_is_in_binds_one_list() {
        let filter = column("site").is_in(["mailer", "dashboard", "auth"]);
        assert_matches(r"site IN \(:[a-zA-Z]{32}\)", filter.sql());
        assert_eq!(
            only_param(&filter),
            &FilterValue::from(vec!["mailer", "dashboard", "auth"])
        );
    }

    #[test]
    fn test_is_in_empty_still_binds() {
        let filter = column("site").is_in(Vec::<String>::new());
        assert!(!filter.is_empty());
        assert_matches(r"site IN \(:[a-zA-Z]{32}\)", filter.sql());
        assert_eq!(only_param(&filter), &FilterValue::List(vec![]));
    }

    #[test]
    fn test_each_call_gets_fresh_id() {
        let col = column("name");
        let a = col.is_equal_to("x");
        let b = col.is_equal_to("x");
        assert_ne!(a.placeholders(), b.placeholders());
        assert!(a.validate().is_ok());
        assert!(b.validate().is_ok());
    }

    #[test]
    fn test_null_value_binds_null() {
        let filter = column("parent_id").is_equal_to(Option::<i64>::None);
        assert!(only_param(&filter).is_null());
    }
}
