//! FieldError for Record accessors

/// Error type for field access operations on Record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist in the record.
    #[error("Field '{field}' not found in record")]
    Missing { field: String },

    /// The field exists but has a different type than requested.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A raw edit value could not be coerced into the field's type.
    #[error("Field '{field}' cannot hold '{value}': expected {expected}")]
    Parse {
        field: String,
        value: String,
        expected: &'static str,
    },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a new parse error for a rejected edit value.
    pub fn parse(field: impl Into<String>, value: impl Into<String>, expected: &'static str) -> Self {
        Self::Parse {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }

    /// Returns the name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } => field,
            Self::TypeMismatch { field, .. } => field,
            Self::Parse { field, .. } => field,
        }
    }
}
