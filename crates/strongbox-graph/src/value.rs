use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single property value stored on a vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Integer(i64),
    String(String),
    List(Vec<String>),
}

/// The property bag of a vertex, ordered by key.
pub type Properties = BTreeMap<String, PropertyValue>;

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::String(_) => "string",
            PropertyValue::List(_) => "list",
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        PropertyValue::List(value)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PropertyValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(PropertyValue::from("jar").as_str(), Some("jar"));
        assert_eq!(PropertyValue::from(42i64).as_i64(), Some(42));
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert!(PropertyValue::from(None::<String>).is_null());
        assert_eq!(
            PropertyValue::from(Some("x".to_string())),
            PropertyValue::String("x".into())
        );
        assert_eq!(PropertyValue::from(1i64).as_str(), None);
    }

    #[test]
    fn test_untagged_json_shape() {
        let mut props = Properties::new();
        props.insert("classifier".into(), PropertyValue::Null);
        props.insert("size".into(), 10i64.into());
        props.insert("tags".into(), vec!["a".to_string()].into());

        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r#"{"classifier":null,"size":10,"tags":["a"]}"#);

        let back: Properties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }
}
