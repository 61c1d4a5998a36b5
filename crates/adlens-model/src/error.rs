//! Error types for model training.

use thiserror::Error;

/// Result type for model training.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while preparing data or fitting models.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Not enough rows to form non-empty train and test partitions.
    #[error("dataset has {rows} row(s); need at least one train and one test row")]
    NotEnoughRows {
        /// Rows available.
        rows: usize,
    },

    /// Test fraction outside the open interval (0, 1).
    #[error("test fraction {0} is outside (0, 1)")]
    InvalidTestFraction(f64),

    /// Feature matrix could not be shaped.
    #[error("feature matrix shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Linear regression fit failed.
    #[error("linear regression fit failed: {0}")]
    Linear(#[from] linfa_linear::LinearError<f64>),
}
