//! Error types for dataset loading.

use thiserror::Error;

/// Result type alias for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors that can occur while reading or interpreting dataset records.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not valid JSON.
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A line is valid JSON but not an object.
    #[error("line {line}: record is not a JSON object")]
    NotAnObject { line: usize },

    #[error("record has no field '{0}'")]
    MissingField(String),

    /// The field exists but does not have the expected shape.
    #[error("field '{field}': {details}")]
    InvalidField { field: String, details: String },
}

impl DatasetError {
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    #[must_use]
    pub fn invalid_field(field: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            details: details.into(),
        }
    }
}
