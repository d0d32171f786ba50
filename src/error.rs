//! Error types for the credit scoring pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Main error type for the scoring pipeline.
///
/// Every variant is fatal: the pipeline never retries a stage.
#[derive(Error, Debug)]
pub enum ScoringError {
    /// The input file could not be opened or parsed as tabular data
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The configured target column is absent after header normalization
    #[error("Target column '{column}' not found in the dataset (available: {available:?})")]
    SchemaError {
        column: String,
        available: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<polars::error::PolarsError> for ScoringError {
    fn from(err: polars::error::PolarsError) -> Self {
        ScoringError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for ScoringError {
    fn from(err: serde_json::Error) -> Self {
        ScoringError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ScoringError {
    fn from(err: ndarray::ShapeError) -> Self {
        ScoringError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = ScoringError::SchemaError {
            column: "status".to_string(),
            available: vec!["age".to_string(), "income".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Target column 'status' not found in the dataset (available: [\"age\", \"income\"])"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScoringError = io_err.into();
        assert!(matches!(err, ScoringError::IoError(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: ScoringError = json_err.into();
        assert!(matches!(err, ScoringError::SerializationError(_)));
    }
}
