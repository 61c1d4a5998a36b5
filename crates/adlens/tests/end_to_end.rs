//! End-to-end pipeline tests over a synthetic two-platform dataset.

use adlens::pipeline::{PipelineConfig, all_outputs_present, run_advanced, run_analysis};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// 14 rows: two platforms over one full week (Mon 2024-03-04 through Sun
/// 2024-03-10), no zero denominators, varying spend and return.
fn write_synthetic_dataset(dir: &Path) -> std::path::PathBuf {
    let mut csv = String::from("date,platform,impressions,clicks,cost,conversions,revenue\n");
    for day in 0..7u32 {
        let date = format!("2024-03-{:02}", 4 + day);
        for (platform, scale) in [("google", 1.0_f64), ("facebook", 0.7_f64)] {
            let impressions = 1000.0 * scale + 120.0 * f64::from(day);
            let clicks = 30.0 * scale + 4.0 * f64::from(day);
            let cost = 18.0 * scale + 2.5 * f64::from(day);
            let conversions = 3.0 * scale + 0.5 * f64::from(day);
            let revenue = cost * (1.4 + 0.17 * f64::from(day) + 0.2 * scale);
            let _ = writeln!(
                csv,
                "{date},{platform},{impressions},{clicks},{cost},{conversions},{revenue}"
            );
        }
    }
    let path = dir.join("ads_data.csv");
    fs::write(&path, csv).unwrap();
    path
}

#[test]
fn analysis_run_produces_aggregates_model_and_files() {
    let dir = TempDir::new().unwrap();
    let data_path = write_synthetic_dataset(dir.path());
    let config = PipelineConfig::new(data_path, dir.path());

    let outcome = run_analysis(&config).unwrap();

    assert_eq!(outcome.n_records, 14);
    assert_eq!(outcome.platform_rows.len(), 2);
    assert_eq!(outcome.platform_rows[0].platform, "facebook");
    assert_eq!(outcome.platform_rows[1].platform, "google");
    assert!(outcome.r_squared <= 1.0);

    assert_eq!(outcome.files.len(), 5);
    assert!(all_outputs_present(&outcome.files));
    assert!(dir.path().join("images/ctr_by_month_platform.png").exists());
    assert!(dir.path().join("images/romi_by_month_platform.png").exists());
    assert!(dir.path().join("images/romi_prediction_scatter.png").exists());
    assert!(dir.path().join("analysis_platform_metrics.csv").exists());

    let summary = fs::read_to_string(dir.path().join("analysis_summary.txt")).unwrap();
    assert!(summary.contains("Linear Regression R-squared:"));
}

#[test]
fn advanced_run_produces_weekday_rows_and_importances() {
    let dir = TempDir::new().unwrap();
    let data_path = write_synthetic_dataset(dir.path());
    let config = PipelineConfig::new(data_path, dir.path());

    let outcome = run_advanced(&config).unwrap();

    // 2 platforms x 7 weekdays, Monday first within each platform.
    assert_eq!(outcome.day_platform_rows.len(), 14);
    assert_eq!(outcome.day_platform_rows[0].bucket.as_deref(), Some("Monday"));
    assert_eq!(outcome.day_platform_rows[6].bucket.as_deref(), Some("Sunday"));

    assert!(outcome.r_squared <= 1.0);
    assert_eq!(outcome.importances.len(), 6);
    let total: f64 = outcome.importances.iter().map(|(_, imp)| imp).sum();
    assert!((total - 1.0).abs() < 1e-9);
    // Ranked descending.
    for pair in outcome.importances.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }

    assert_eq!(outcome.files.len(), 4);
    assert!(all_outputs_present(&outcome.files));
    assert!(dir.path().join("images/ctr_by_day_platform.png").exists());
    assert!(dir.path().join("images/romi_feature_importance.png").exists());

    let summary = fs::read_to_string(dir.path().join("advanced_analysis_summary.txt")).unwrap();
    assert!(summary.contains("Random Forest R-squared:"));
    assert!(summary.contains("Feature Importances:"));
}

#[test]
fn sum_columns_partition_the_dataset() {
    let dir = TempDir::new().unwrap();
    let data_path = write_synthetic_dataset(dir.path());
    let config = PipelineConfig::new(data_path.clone(), dir.path());

    let records = adlens::data::load_records(&data_path).unwrap();
    let total_cost: f64 = records.iter().map(|r| r.cost).sum();

    let outcome = run_analysis(&config).unwrap();
    let grouped_cost: f64 = outcome.platform_rows.iter().map(|r| r.cost).sum();
    assert!((grouped_cost - total_cost).abs() < 1e-9);
}

#[test]
fn zero_click_row_flows_through_without_aborting() {
    let dir = TempDir::new().unwrap();
    let data_path = write_synthetic_dataset(dir.path());

    // Append a row with zero clicks: row-level CPC is infinite, the run
    // still completes, and the group CPC stays the finite ratio of sums.
    let mut csv = fs::read_to_string(&data_path).unwrap();
    csv.push_str("2024-03-11,google,500,0,4.0,0,0\n");
    fs::write(&data_path, csv).unwrap();

    let records = adlens::data::load_records(&data_path).unwrap();
    let derived = adlens::metrics::derive_records(records);
    let degenerate = derived
        .iter()
        .find(|r| r.record.clicks == 0.0)
        .expect("appended row present");
    assert!(degenerate.cpc.is_infinite());

    let config = PipelineConfig::new(data_path, dir.path());
    let outcome = run_advanced(&config).unwrap();
    let google = outcome
        .day_platform_rows
        .iter()
        .find(|r| r.platform == "google" && r.bucket.as_deref() == Some("Monday"))
        .unwrap();
    assert!(google.cpc.is_finite());
}

#[test]
fn missing_dataset_aborts_with_no_output() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig::new(dir.path().join("absent.csv"), dir.path());

    assert!(run_analysis(&config).is_err());
    assert!(!dir.path().join("images").exists());
    assert!(!dir.path().join("analysis_summary.txt").exists());
}
