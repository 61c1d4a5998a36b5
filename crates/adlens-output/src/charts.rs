//! PNG chart rendering.
//!
//! Line charts plot one series per platform over an ordered set of time
//! buckets. Non-finite values and absent buckets break a series into
//! separate runs, mirroring how the gaps would appear if the frame were
//! reindexed. Gridlines are drawn as a light alpha-blended mesh.

use crate::error::{OutputError, Result};
use adlens_metrics::{AggregateRow, WEEKDAY_ORDER};
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fs;
use std::path::Path;

/// Chart canvas size, landscape.
const CANVAS: (u32, u32) = (800, 500);

/// Per-platform metric series over a shared, ordered set of buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    /// Bucket labels along the x axis, in display order.
    pub buckets: Vec<String>,
    /// `(platform, value per bucket)` pairs; `None` where the platform
    /// has no row for a bucket.
    pub series: Vec<(String, Vec<Option<f64>>)>,
}

impl SeriesSet {
    /// Build a series set from bucketed aggregate rows, selecting one
    /// metric per row. Buckets and platforms both come out in sorted
    /// order; for `YYYY-MM` month keys the sort is chronological.
    pub fn from_rows(rows: &[AggregateRow], metric: impl Fn(&AggregateRow) -> f64) -> Self {
        let buckets: BTreeSet<&String> = rows.iter().filter_map(|r| r.bucket.as_ref()).collect();
        let buckets = buckets.into_iter().cloned().collect();
        Self::over_buckets(rows, buckets, metric)
    }

    /// Like [`SeriesSet::from_rows`], but reindexed over the full
    /// calendar week Monday through Sunday; weekdays with no data become
    /// gaps.
    pub fn full_week(rows: &[AggregateRow], metric: impl Fn(&AggregateRow) -> f64) -> Self {
        let buckets = WEEKDAY_ORDER.iter().map(|d| d.to_string()).collect();
        Self::over_buckets(rows, buckets, metric)
    }

    fn over_buckets(
        rows: &[AggregateRow],
        buckets: Vec<String>,
        metric: impl Fn(&AggregateRow) -> f64,
    ) -> Self {
        let platforms: BTreeSet<&str> = rows.iter().map(|r| r.platform.as_str()).collect();
        let series = platforms
            .into_iter()
            .map(|platform| {
                let values = buckets
                    .iter()
                    .map(|bucket| {
                        rows.iter()
                            .find(|r| {
                                r.platform == platform && r.bucket.as_deref() == Some(bucket)
                            })
                            .map(&metric)
                    })
                    .collect();
                (platform.to_string(), values)
            })
            .collect();
        Self { buckets, series }
    }
}

/// Render a line chart of a metric against time buckets, one line per
/// platform. `markers` draws a circle at each data point.
pub fn render_line_chart(
    path: impl AsRef<Path>,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    set: &SeriesSet,
    markers: bool,
) -> Result<()> {
    ensure_parent_dir(path.as_ref())?;
    draw_line_chart(path.as_ref(), title, x_desc, y_desc, set, markers)
        .map_err(|e| OutputError::Chart(e.to_string()))
}

/// Render a horizontal bar chart of feature importances. `importances`
/// comes in most-important-first; bars are stacked with the least
/// important at the bottom.
pub fn render_importance_chart(
    path: impl AsRef<Path>,
    title: &str,
    importances: &[(String, f64)],
) -> Result<()> {
    ensure_parent_dir(path.as_ref())?;
    draw_importance_chart(path.as_ref(), title, importances)
        .map_err(|e| OutputError::Chart(e.to_string()))
}

/// Render a predicted-vs-actual scatter plot for the held-out partition.
pub fn render_scatter_chart(
    path: impl AsRef<Path>,
    title: &str,
    actual: &[f64],
    predicted: &[f64],
) -> Result<()> {
    ensure_parent_dir(path.as_ref())?;
    draw_scatter_chart(path.as_ref(), title, actual, predicted)
        .map_err(|e| OutputError::Chart(e.to_string()))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn draw_line_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    set: &SeriesSet,
    markers: bool,
) -> std::result::Result<(), Box<dyn StdError>> {
    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    let n = set.buckets.len().max(1);
    let (y_min, y_max) = value_bounds(
        set.series
            .iter()
            .flat_map(|(_, values)| values.iter().flatten().copied()),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)?;

    let buckets = set.buckets.clone();
    chart
        .configure_mesh()
        .x_labels(n)
        .x_label_formatter(&|x: &f64| {
            let idx = x.round() as i64;
            usize::try_from(idx)
                .ok()
                .and_then(|i| buckets.get(i).cloned())
                .unwrap_or_default()
        })
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    for (platform_idx, (platform, values)) in set.series.iter().enumerate() {
        let color = Palette99::pick(platform_idx).mix(0.9);
        let mut labeled = false;
        for run in contiguous_runs(values) {
            let points: Vec<(f64, f64)> =
                run.iter().map(|&(x, y)| (x as f64, y)).collect();
            let anno = chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;
            if !labeled {
                anno.label(platform).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
                labeled = true;
            }
        }
        if markers {
            let dots: Vec<(f64, f64)> = values
                .iter()
                .enumerate()
                .filter_map(|(x, v)| v.filter(|v| v.is_finite()).map(|v| (x as f64, v)))
                .collect();
            chart.draw_series(
                dots.into_iter().map(|point| Circle::new(point, 3, color.filled())),
            )?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_importance_chart(
    path: &Path,
    title: &str,
    importances: &[(String, f64)],
) -> std::result::Result<(), Box<dyn StdError>> {
    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    // Least important at the bottom, as a horizontal barh would stack.
    let mut items: Vec<(String, f64)> = importances.to_vec();
    items.reverse();

    let n = items.len().max(1);
    let x_max = items.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let x_max = if x_max > 0.0 { x_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

    let names: Vec<String> = items.iter().map(|(name, _)| name.clone()).collect();
    chart
        .configure_mesh()
        .y_labels(n)
        .y_label_formatter(&|y: &f64| {
            let idx = y.round() as i64;
            usize::try_from(idx)
                .ok()
                .and_then(|i| names.get(i).cloned())
                .unwrap_or_default()
        })
        .x_desc("Importance")
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(items.iter().enumerate().map(|(i, (_, value))| {
        Rectangle::new(
            [(0.0, i as f64 - 0.35), (*value, i as f64 + 0.35)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_scatter_chart(
    path: &Path,
    title: &str,
    actual: &[f64],
    predicted: &[f64],
) -> std::result::Result<(), Box<dyn StdError>> {
    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    let points: Vec<(f64, f64)> = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| a.is_finite() && p.is_finite())
        .map(|(&a, &p)| (a, p))
        .collect();

    let (x_min, x_max) = value_bounds(points.iter().map(|&(a, _)| a));
    let (y_min, y_max) = value_bounds(points.iter().map(|&(_, p)| p));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Actual ROMI")
        .y_desc("Predicted ROMI")
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(
        points
            .into_iter()
            .map(|point| Circle::new(point, 4, BLUE.mix(0.5).filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Padded min/max bounds over the finite values of an iterator; a flat or
/// empty range falls back to a unit span so chart construction never gets
/// an empty coordinate range.
fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values.filter(|v| v.is_finite()) {
        min = min.min(value);
        max = max.max(value);
    }
    if min > max {
        return (0.0, 1.0);
    }
    let span = (max - min).abs();
    let pad = if span > 0.0 { span * 0.05 } else { 0.5 };
    (min - pad, max + pad)
}

/// Split a bucket-aligned series into runs of consecutive finite points.
fn contiguous_runs(values: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(usize, f64)> = Vec::new();
    for (idx, value) in values.iter().enumerate() {
        match value {
            Some(v) if v.is_finite() => current.push((idx, *v)),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(platform: &str, bucket: &str, ctr: f64) -> AggregateRow {
        AggregateRow {
            platform: platform.to_string(),
            bucket: Some(bucket.to_string()),
            weekday_ord: None,
            impressions: 0.0,
            clicks: 0.0,
            cost: 0.0,
            conversions: 0.0,
            revenue: 0.0,
            ctr,
            cpc: 0.0,
            cpm: 0.0,
            romi: 0.0,
        }
    }

    #[test]
    fn series_set_aligns_platforms_over_buckets() {
        let rows = vec![
            row("google", "2024-01", 0.04),
            row("google", "2024-02", 0.05),
            row("facebook", "2024-01", 0.03),
        ];
        let set = SeriesSet::from_rows(&rows, |r| r.ctr);
        assert_eq!(set.buckets, ["2024-01", "2024-02"]);
        assert_eq!(set.series.len(), 2);
        // BTreeSet ordering: facebook before google.
        assert_eq!(set.series[0].0, "facebook");
        assert_eq!(set.series[0].1, vec![Some(0.03), None]);
        assert_eq!(set.series[1].1, vec![Some(0.04), Some(0.05)]);
    }

    #[test]
    fn month_buckets_sort_chronologically_across_platforms() {
        // Platform-major row order puts facebook's months before
        // google's; the axis must still come out chronological.
        let rows = vec![
            row("facebook", "2024-02", 0.03),
            row("facebook", "2024-03", 0.02),
            row("google", "2024-01", 0.04),
            row("google", "2024-02", 0.05),
        ];
        let set = SeriesSet::from_rows(&rows, |r| r.ctr);
        assert_eq!(set.buckets, ["2024-01", "2024-02", "2024-03"]);
        assert_eq!(set.series[0].1, vec![None, Some(0.03), Some(0.02)]);
        assert_eq!(set.series[1].1, vec![Some(0.04), Some(0.05), None]);
    }

    #[test]
    fn full_week_reindexes_to_seven_buckets() {
        let rows = vec![row("google", "Wednesday", 0.02)];
        let set = SeriesSet::full_week(&rows, |r| r.ctr);
        assert_eq!(set.buckets.len(), 7);
        assert_eq!(set.series[0].1[2], Some(0.02));
        assert_eq!(set.series[0].1[0], None);
    }

    #[test]
    fn runs_break_on_gaps_and_non_finite_values() {
        let values = vec![
            Some(1.0),
            Some(2.0),
            None,
            Some(f64::INFINITY),
            Some(3.0),
            Some(4.0),
        ];
        let runs = contiguous_runs(&values);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(0, 1.0), (1, 2.0)]);
        assert_eq!(runs[1], vec![(4, 3.0), (5, 4.0)]);
    }

    #[test]
    fn bounds_ignore_non_finite_and_never_collapse() {
        let (min, max) = value_bounds([1.0, f64::NAN, 3.0, f64::INFINITY].into_iter());
        assert!(min < 1.0 && max > 3.0);

        let (min, max) = value_bounds(std::iter::empty());
        assert_eq!((min, max), (0.0, 1.0));

        let (min, max) = value_bounds([2.0, 2.0].into_iter());
        assert!(min < 2.0 && max > 2.0);
    }
}
