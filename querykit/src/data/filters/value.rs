//! Values bound to filter parameters

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value bound to a named filter parameter.
///
/// `List` is only produced by set-membership predicates (`is_in`) and is
/// expanded into one positional argument per element at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Short type name used in logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Self::List(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&String> for FilterValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scalars() {
        assert_eq!(FilterValue::from(12), FilterValue::Int(12));
        assert_eq!(FilterValue::from(12i64), FilterValue::Int(12));
        assert_eq!(FilterValue::from(1.5), FilterValue::Float(1.5));
        assert_eq!(FilterValue::from(true), FilterValue::Bool(true));
        assert_eq!(FilterValue::from("test"), FilterValue::Text("test".to_string()));
    }

    #[test]
    fn test_from_option() {
        assert!(FilterValue::from(Option::<i64>::None).is_null());
        assert_eq!(FilterValue::from(Some(3)), FilterValue::Int(3));
    }

    #[test]
    fn test_from_vec() {
        let value = FilterValue::from(vec!["mailer", "dashboard"]);
        assert!(value.is_list());
        assert_eq!(
            value,
            FilterValue::List(vec![
                FilterValue::Text("mailer".to_string()),
                FilterValue::Text("dashboard".to_string()),
            ])
        );
    }

    #[test]
    fn test_serialize_untagged() {
        let value = FilterValue::List(vec![FilterValue::Int(1), FilterValue::Null]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[1,null]");
    }

    #[test]
    fn test_deserialize_prefers_int() {
        let value: FilterValue = serde_json::from_str("12").unwrap();
        assert_eq!(value, FilterValue::Int(12));
        let value: FilterValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(value, FilterValue::Float(12.5));
    }

    #[test]
    fn test_display() {
        let value = FilterValue::from(vec![1, 2]);
        assert_eq!(value.to_string(), "[1, 2]");
        assert_eq!(FilterValue::from("a").to_string(), "'a'");
        assert_eq!(FilterValue::Null.kind(), "null");
    }

    #[test]
    fn test_display_escapes_quotes() {
        assert_eq!(FilterValue::from("o'brien").to_string(), "'o''brien'");
        assert_eq!(
            FilterValue::from(vec!["it's", "ok"]).to_string(),
            "['it''s', 'ok']"
        );
    }
}
