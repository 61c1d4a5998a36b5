//! Charts, CSV tables and text summaries for the AdLens analytics
//! pipeline.
//!
//! Everything here writes to disk: PNG charts via plotters, aggregate
//! tables via the csv crate, and plain-text model summaries. Chart
//! renderers create their parent directory if absent; table and summary
//! writes go to the given path as-is and overwrite any existing file.

#![forbid(unsafe_code)]

pub mod charts;
pub mod error;
pub mod export;
pub mod summary;

pub use charts::{
    SeriesSet, render_importance_chart, render_line_chart, render_scatter_chart,
};
pub use error::{OutputError, Result};
pub use export::{write_day_platform_metrics, write_platform_metrics};
pub use summary::{write_forest_summary, write_linear_summary};
