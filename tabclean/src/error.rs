//! Error types for table cleaning operations.

use polars::prelude::PolarsError;

/// Result type for table cleaning operations
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Error type for table cleaning operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CleaningError {
    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Cannot convert {value} in column '{column}' (row {row}) to {target}")]
    TypeConversion {
        column: String,
        row: usize,
        value: String,
        target: &'static str,
    },

    #[error("Empty value in column '{column}' (row {row})")]
    EmptyValue { column: String, row: usize },

    #[error("Column '{column}' has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Cannot summarize a table with no rows")]
    EmptyTable,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("DataFrame error: {0}")]
    Frame(String),
}

// Column lookups and name checks are resolved before polars is called, so
// whatever polars still reports is carried as text.
impl From<PolarsError> for CleaningError {
    fn from(e: PolarsError) -> Self {
        CleaningError::Frame(e.to_string())
    }
}

impl CleaningError {
    /// Returns the offending column name, when the error refers to one.
    pub fn column(&self) -> Option<&str> {
        match self {
            CleaningError::MissingColumn(column)
            | CleaningError::TypeConversion { column, .. }
            | CleaningError::EmptyValue { column, .. }
            | CleaningError::LengthMismatch { column, .. }
            | CleaningError::DuplicateColumn(column) => Some(column),
            CleaningError::EmptyTable
            | CleaningError::Configuration(_)
            | CleaningError::Frame(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CleaningError::MissingColumn("age".to_string());
        assert_eq!(err.to_string(), "Column not found: age");

        let err = CleaningError::TypeConversion {
            column: "age".to_string(),
            row: 3,
            value: "NaN".to_string(),
            target: "integer",
        };
        assert_eq!(
            err.to_string(),
            "Cannot convert NaN in column 'age' (row 3) to integer"
        );
    }

    #[test]
    fn test_error_column() {
        let err = CleaningError::EmptyValue {
            column: "gender".to_string(),
            row: 0,
        };
        assert_eq!(err.column(), Some("gender"));
        assert_eq!(CleaningError::EmptyTable.column(), None);
    }
}
