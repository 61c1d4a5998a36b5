//! Error types for report output.

use thiserror::Error;

/// Result type for report output.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Errors that can occur while writing charts, tables or summaries.
#[derive(Debug, Error)]
pub enum OutputError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart rendering error. Plotters error types are generic over the
    /// backend, so they are collapsed to a message here.
    #[error("chart rendering error: {0}")]
    Chart(String),
}
