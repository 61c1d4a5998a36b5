//! Error types for dataset loading.

use thiserror::Error;

/// Result type for dataset loading.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading the advertising dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset {path}: {source}")]
    Open {
        /// Path that was attempted.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the header row.
    #[error("required column missing from header: {0}")]
    MissingColumn(&'static str),

    /// CSV parsing or deserialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
