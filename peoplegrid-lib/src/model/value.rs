//! Value enum for dynamic cell values

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value read from a record field or produced by an aggregate.
///
/// `Null` stands for a missing value: a display-only column, an empty
/// aggregate on a group row, or a field the accessor could not resolve.
///
/// # Example
///
/// ```
/// use peoplegrid_lib::model::Value;
///
/// let name = Value::from("Ada");
/// let age = Value::from(36i64);
/// let empty = Value::Null;
/// assert_eq!(age.as_f64(), Some(36.0));
/// assert!(empty.is_null());
/// assert_eq!(name.to_string(), "Ada");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/missing value.
    #[default]
    Null,
    /// Integer value.
    Int(i64),
    /// Floating point value (averages, medians).
    Float(f64),
    /// String value.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Builds a number value, keeping integral results as `Int`.
    pub fn number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            Value::Int(n as i64)
        } else {
            Value::Float(n)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
