//! Error types for metric derivation and aggregation.

use thiserror::Error;

/// Result type for metric operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors that can occur while deriving or aggregating metrics.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Polars error raised during frame construction or group-by.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// An aggregate frame came back without an expected column or dtype.
    #[error("malformed aggregate frame: {0}")]
    MalformedFrame(String),
}
