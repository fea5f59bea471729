//! Typed field values.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::schema::FieldType;

/// A value coerced from field text under a declared [`FieldType`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Raw field text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
    /// Date-time without time zone.
    DateTime(NaiveDateTime),
    /// Boolean.
    Boolean(bool),
}

impl FieldValue {
    /// Returns the declared type this value belongs to.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Decimal(_) => FieldType::Decimal,
            FieldValue::DateTime(_) => FieldType::DateTime,
            FieldValue::Boolean(_) => FieldType::Boolean,
        }
    }

    /// Returns the text content for [`FieldValue::Text`] values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer for [`FieldValue::Integer`] values.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the boolean for [`FieldValue::Boolean`] values.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Decimal(d) => write!(f, "{d}"),
            FieldValue::DateTime(dt) => write!(f, "{dt}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}
