//! End-to-end analysis runs.
//!
//! Each run is a straight-line pipeline: load the dataset, derive per-row
//! KPIs, aggregate, fit a ROMI model, and write charts and report files
//! under the configured output directory. There is no branching or retry;
//! the first error aborts the run and nothing downstream is written.

use adlens_data::load_records;
use adlens_metrics::{AggregateRow, GroupKey, aggregate, derive_records};
use adlens_model::{
    FeatureTable, ForestConfig, fit_forest, fit_linear, train_test_split,
};
use adlens_output::{
    SeriesSet, render_importance_chart, render_line_chart, render_scatter_chart,
    write_day_platform_metrics, write_forest_summary, write_linear_summary,
    write_platform_metrics,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Seed shared by both variants' train/test splits and the forest.
pub const SPLIT_SEED: u64 = 42;
/// Held-out fraction for the linear variant.
pub const LINEAR_TEST_FRACTION: f64 = 0.3;
/// Held-out fraction for the forest variant.
pub const FOREST_TEST_FRACTION: f64 = 0.2;

/// Errors from any pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Dataset loading failed.
    #[error(transparent)]
    Data(#[from] adlens_data::DataError),

    /// Metric derivation or aggregation failed.
    #[error(transparent)]
    Metrics(#[from] adlens_metrics::MetricsError),

    /// Model training failed.
    #[error(transparent)]
    Model(#[from] adlens_model::ModelError),

    /// Chart or report writing failed.
    #[error(transparent)]
    Output(#[from] adlens_output::OutputError),
}

/// Input and output locations for a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path of the advertising dataset CSV.
    pub data_path: PathBuf,
    /// Directory that receives every output; `images/` is created
    /// beneath it.
    pub out_dir: PathBuf,
}

impl PipelineConfig {
    /// Configuration reading `data_path` and writing under `out_dir`.
    pub fn new(data_path: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            out_dir: out_dir.into(),
        }
    }

    fn image_path(&self, name: &str) -> PathBuf {
        self.out_dir.join("images").join(name)
    }
}

/// Result of the linear-variant run.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Rows loaded from the dataset.
    pub n_records: usize,
    /// Per-platform aggregate, alphabetical.
    pub platform_rows: Vec<AggregateRow>,
    /// Held-out R² of the linear model.
    pub r_squared: f64,
    /// Every file the run wrote.
    pub files: Vec<PathBuf>,
}

/// Result of the forest-variant run.
#[derive(Debug)]
pub struct AdvancedOutcome {
    /// Rows loaded from the dataset.
    pub n_records: usize,
    /// Per-(platform, weekday) aggregate, weekdays Monday first.
    pub day_platform_rows: Vec<AggregateRow>,
    /// Held-out R² of the forest.
    pub r_squared: f64,
    /// Normalized feature importances, most important first.
    pub importances: Vec<(String, f64)>,
    /// Every file the run wrote.
    pub files: Vec<PathBuf>,
}

/// Run the linear analysis: platform and monthly aggregates, monthly CTR
/// and ROMI trend charts, an OLS ROMI model with a prediction scatter,
/// and the platform table and summary files.
pub fn run_analysis(config: &PipelineConfig) -> Result<AnalysisOutcome, PipelineError> {
    let records = load_records(&config.data_path)?;
    let n_records = records.len();
    let derived = derive_records(records);

    let platform_rows = aggregate(&derived, GroupKey::Platform)?;
    let monthly_rows = aggregate(&derived, GroupKey::PlatformMonth)?;

    let mut files = Vec::new();

    let ctr_chart = config.image_path("ctr_by_month_platform.png");
    render_line_chart(
        &ctr_chart,
        "CTR by Month and Platform",
        "Month",
        "CTR",
        &SeriesSet::from_rows(&monthly_rows, |r| r.ctr),
        false,
    )?;
    files.push(ctr_chart);

    let romi_chart = config.image_path("romi_by_month_platform.png");
    render_line_chart(
        &romi_chart,
        "ROMI by Month and Platform",
        "Month",
        "ROMI",
        &SeriesSet::from_rows(&monthly_rows, |r| r.romi),
        false,
    )?;
    files.push(romi_chart);

    let table = FeatureTable::linear_features(&derived);
    let split = train_test_split(table.n_rows(), LINEAR_TEST_FRACTION, SPLIT_SEED)?;
    let report = fit_linear(&table, &split)?;

    let scatter_chart = config.image_path("romi_prediction_scatter.png");
    render_scatter_chart(
        &scatter_chart,
        "Predicted vs Actual ROMI (Linear Regression)",
        &report.actual,
        &report.predicted,
    )?;
    files.push(scatter_chart);

    let metrics_csv = config.out_dir.join("analysis_platform_metrics.csv");
    write_platform_metrics(&metrics_csv, &platform_rows)?;
    files.push(metrics_csv);

    let summary_txt = config.out_dir.join("analysis_summary.txt");
    write_linear_summary(&summary_txt, &platform_rows, report.r_squared)?;
    files.push(summary_txt);

    Ok(AnalysisOutcome {
        n_records,
        platform_rows,
        r_squared: report.r_squared,
        files,
    })
}

/// Run the advanced analysis: day-of-week segmentation with a weekday CTR
/// chart, a random-forest ROMI model with its importance chart, and the
/// day-platform table and summary files.
pub fn run_advanced(config: &PipelineConfig) -> Result<AdvancedOutcome, PipelineError> {
    let records = load_records(&config.data_path)?;
    let n_records = records.len();
    let derived = derive_records(records);

    let day_platform_rows = aggregate(&derived, GroupKey::PlatformWeekday)?;

    let mut files = Vec::new();

    let ctr_chart = config.image_path("ctr_by_day_platform.png");
    render_line_chart(
        &ctr_chart,
        "Average CTR by Day of Week and Platform",
        "Day of Week",
        "Average CTR",
        &SeriesSet::full_week(&day_platform_rows, |r| r.ctr),
        true,
    )?;
    files.push(ctr_chart);

    let table = FeatureTable::forest_features(&derived);
    let split = train_test_split(table.n_rows(), FOREST_TEST_FRACTION, SPLIT_SEED)?;
    let report = fit_forest(&table, &split, ForestConfig::default())?;

    let importance_chart = config.image_path("romi_feature_importance.png");
    render_importance_chart(
        &importance_chart,
        "Feature Importance for ROMI Prediction (Random Forest)",
        &report.importances,
    )?;
    files.push(importance_chart);

    let metrics_csv = config.out_dir.join("analysis_day_platform_metrics.csv");
    write_day_platform_metrics(&metrics_csv, &day_platform_rows)?;
    files.push(metrics_csv);

    let summary_txt = config.out_dir.join("advanced_analysis_summary.txt");
    write_forest_summary(&summary_txt, report.r_squared, &report.importances)?;
    files.push(summary_txt);

    Ok(AdvancedOutcome {
        n_records,
        day_platform_rows,
        r_squared: report.r_squared,
        importances: report.importances,
        files,
    })
}

/// True when every file a run reported is present on disk.
pub fn all_outputs_present(files: &[PathBuf]) -> bool {
    files.iter().map(PathBuf::as_path).all(Path::exists)
}
