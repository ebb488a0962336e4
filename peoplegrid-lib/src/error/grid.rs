//! Table and generator errors

use super::FieldError;

/// Errors returned by the generator and the table engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An argument was outside of its accepted domain.
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// No column with this id exists in the table.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// No row with this id exists in the table data.
    #[error("Unknown row: {0}")]
    UnknownRow(String),

    /// The cell cannot be edited (group row, aggregated cell or display column).
    #[error("Cell {row}/{column} is not editable")]
    NotEditable { row: String, column: String },

    /// Field access or coercion failed.
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Returns `true` if the error was caused by bad caller input rather than
    /// by a missing row or column.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::Field(FieldError::Parse { .. }))
    }
}
