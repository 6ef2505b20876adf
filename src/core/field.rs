//! Polymorphic field values
//!
//! Documents expose their fields to the query layer as [`FieldValue`]s so the
//! filter evaluator can compare, regex-match and test membership without
//! knowing the concrete document type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Get the value as an array slice if possible
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_str(), Some("test"));
        assert_eq!(value.as_bool(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_uuid() {
        let id = Uuid::new_v4();
        let value = FieldValue::from(id);
        assert_eq!(value.as_uuid(), Some(id));
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_field_value_array_membership() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let value = FieldValue::Array(vec![a.into(), b.into()]);
        let values = value.as_array().unwrap();
        assert!(values.contains(&FieldValue::from(a)));
        assert!(!values.contains(&FieldValue::from(Uuid::new_v4())));
    }

    #[test]
    fn test_from_option() {
        let none: Option<Uuid> = None;
        assert!(FieldValue::from(none).is_null());
        assert_eq!(
            FieldValue::from(Some("x")),
            FieldValue::String("x".to_string())
        );
    }

    #[test]
    fn test_serde_untagged_roundtrip() {
        let original = FieldValue::Boolean(true);
        let json = serde_json::to_string(&original).expect("serialize should succeed");
        let restored: FieldValue = serde_json::from_str(&json).expect("deserialize should succeed");
        assert_eq!(original, restored);
    }
}
