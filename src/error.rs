//! Error type shared by every stage of the survey pipeline.

/// Errors that can occur while loading, slicing or analysing survey data
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The underlying resource (file or bundle directory) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// An expected column or dataset is absent, mistyped or holds an unknown value
    #[error("Schema error: {0}")]
    Schema(String),

    /// Row counts or per-row widths disagree across row-aligned data
    #[error("Shape error: {0}")]
    Shape(String),

    /// Values violate a data invariant (negative ivar, untrainable labels, ...)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SurveyError {
    /// Shorthand for a row-count mismatch between two named datasets.
    pub(crate) fn row_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        SurveyError::Shape(format!(
            "{what} has {actual} rows, expected {expected}"
        ))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SurveyError>;
