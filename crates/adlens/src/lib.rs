//! AdLens: cross-platform advertising KPI analytics and ROMI modeling.
//!
//! The workspace splits the pipeline across four library crates:
//! [`adlens_data`] (loading), [`adlens_metrics`] (KPI derivation and
//! aggregation), [`adlens_model`] (regression) and [`adlens_output`]
//! (charts, tables, summaries). This umbrella crate wires them into the
//! two analysis runs exposed by the CLI.

#![forbid(unsafe_code)]

pub mod pipeline;

pub use adlens_data as data;
pub use adlens_metrics as metrics;
pub use adlens_model as model;
pub use adlens_output as output;
pub use pipeline::{AdvancedOutcome, AnalysisOutcome, PipelineConfig, PipelineError, run_advanced, run_analysis};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
