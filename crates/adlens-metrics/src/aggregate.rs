//! Grouped reduction of derived records.
//!
//! Grouping runs through a polars lazy group-by. Base columns reduce by
//! sum; KPI columns of an aggregate row are recomputed from that row's
//! sums (ratio-of-sums), never averaged from per-row ratios, so a single
//! zero-denominator row cannot drag a group KPI to infinity. The group
//! KPI is only non-finite when the group's summed denominator is zero.

use crate::error::{MetricsError, Result};
use crate::kpi::DerivedRecord;
use polars::prelude::*;
use serde::Serialize;

/// Grouping key for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// One row per platform.
    Platform,
    /// One row per (platform, day-of-week) pair, ordered Monday first.
    PlatformWeekday,
    /// One row per (platform, `YYYY-MM` month) pair, chronological.
    PlatformMonth,
}

/// One aggregated group: summed base metrics plus KPIs recomputed from the
/// sums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    /// Platform key.
    pub platform: String,
    /// Time-bucket key (weekday name or month), absent for platform-only
    /// grouping.
    pub bucket: Option<String>,
    /// Calendar ordinal of the weekday bucket, Monday = 1. Present only
    /// for weekday grouping; used to reindex chart series.
    pub weekday_ord: Option<u32>,
    /// Summed impressions.
    pub impressions: f64,
    /// Summed clicks.
    pub clicks: f64,
    /// Summed cost.
    pub cost: f64,
    /// Summed conversions.
    pub conversions: f64,
    /// Summed revenue.
    pub revenue: f64,
    /// Group click-through rate, from summed clicks and impressions.
    pub ctr: f64,
    /// Group cost per click, from summed cost and clicks.
    pub cpc: f64,
    /// Group cost per thousand impressions.
    pub cpm: f64,
    /// Group return on marketing investment.
    pub romi: f64,
}

/// Group derived records by `key` and reduce each group.
///
/// Output order is deterministic: platforms alphabetical, weekday buckets
/// Monday through Sunday, month buckets chronological.
pub fn aggregate(records: &[DerivedRecord], key: GroupKey) -> Result<Vec<AggregateRow>> {
    let df = build_frame(records, key)?;

    let mut aggs = vec![
        col("impressions").sum(),
        col("clicks").sum(),
        col("cost").sum(),
        col("conversions").sum(),
        col("revenue").sum(),
    ];
    if key == GroupKey::PlatformWeekday {
        aggs.push(col("bucket_ord").first());
    }

    let group_cols = match key {
        GroupKey::Platform => vec![col("platform")],
        GroupKey::PlatformWeekday | GroupKey::PlatformMonth => {
            vec![col("platform"), col("bucket")]
        }
    };

    let reduced = df
        .lazy()
        .group_by(group_cols)
        .agg(aggs)
        .with_columns(vec![
            (col("clicks") / col("impressions")).alias("ctr"),
            (col("cost") / col("clicks")).alias("cpc"),
            (col("cost") / col("impressions") * lit(1000.0)).alias("cpm"),
            ((col("revenue") - col("cost")) / col("cost")).alias("romi"),
        ]);

    let sorted = match key {
        GroupKey::Platform => reduced.sort(["platform"], SortMultipleOptions::default()),
        GroupKey::PlatformWeekday => {
            reduced.sort(["platform", "bucket_ord"], SortMultipleOptions::default())
        }
        GroupKey::PlatformMonth => {
            reduced.sort(["platform", "bucket"], SortMultipleOptions::default())
        }
    };

    rows_from_frame(&sorted.collect()?, key)
}

fn build_frame(records: &[DerivedRecord], key: GroupKey) -> Result<DataFrame> {
    let platforms: Vec<&str> = records.iter().map(|r| r.record.platform.as_str()).collect();
    let mut columns: Vec<Column> = vec![Series::new("platform".into(), platforms).into()];

    match key {
        GroupKey::Platform => {}
        GroupKey::PlatformWeekday => {
            let buckets: Vec<&str> = records.iter().map(|r| r.weekday).collect();
            let ordinals: Vec<u32> = records.iter().map(|r| r.weekday_ord).collect();
            columns.push(Series::new("bucket".into(), buckets).into());
            columns.push(Series::new("bucket_ord".into(), ordinals).into());
        }
        GroupKey::PlatformMonth => {
            let buckets: Vec<&str> = records.iter().map(|r| r.month.as_str()).collect();
            columns.push(Series::new("bucket".into(), buckets).into());
        }
    }

    columns.push(numeric_column("impressions", records, |r| r.record.impressions));
    columns.push(numeric_column("clicks", records, |r| r.record.clicks));
    columns.push(numeric_column("cost", records, |r| r.record.cost));
    columns.push(numeric_column("conversions", records, |r| r.record.conversions));
    columns.push(numeric_column("revenue", records, |r| r.record.revenue));

    Ok(DataFrame::new(columns)?)
}

fn numeric_column(
    name: &str,
    records: &[DerivedRecord],
    select: impl Fn(&DerivedRecord) -> f64,
) -> Column {
    let values: Vec<f64> = records.iter().map(select).collect();
    Series::new(name.into(), values).into()
}

fn rows_from_frame(df: &DataFrame, key: GroupKey) -> Result<Vec<AggregateRow>> {
    let platforms = df
        .column("platform")?
        .str()
        .map_err(|e| MetricsError::MalformedFrame(e.to_string()))?;

    let buckets = match key {
        GroupKey::Platform => None,
        GroupKey::PlatformWeekday | GroupKey::PlatformMonth => Some(
            df.column("bucket")?
                .str()
                .map_err(|e| MetricsError::MalformedFrame(e.to_string()))?,
        ),
    };
    let ordinals = match key {
        GroupKey::PlatformWeekday => Some(
            df.column("bucket_ord")?
                .u32()
                .map_err(|e| MetricsError::MalformedFrame(e.to_string()))?,
        ),
        _ => None,
    };

    let numeric = |name: &str| -> Result<Vec<f64>> {
        let chunked = df
            .column(name)?
            .f64()
            .map_err(|e| MetricsError::MalformedFrame(e.to_string()))?;
        Ok((0..df.height())
            .map(|i| chunked.get(i).unwrap_or(f64::NAN))
            .collect())
    };

    let impressions = numeric("impressions")?;
    let clicks = numeric("clicks")?;
    let cost = numeric("cost")?;
    let conversions = numeric("conversions")?;
    let revenue = numeric("revenue")?;
    let ctr = numeric("ctr")?;
    let cpc = numeric("cpc")?;
    let cpm = numeric("cpm")?;
    let romi = numeric("romi")?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(AggregateRow {
            platform: platforms.get(i).unwrap_or_default().to_string(),
            bucket: buckets.and_then(|b| b.get(i)).map(str::to_string),
            weekday_ord: ordinals.and_then(|o| o.get(i)),
            impressions: impressions[i],
            clicks: clicks[i],
            cost: cost[i],
            conversions: conversions[i],
            revenue: revenue[i],
            ctr: ctr[i],
            cpc: cpc[i],
            cpm: cpm[i],
            romi: romi[i],
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::derive_records;
    use adlens_data::AdRecord;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn row(day: u32, platform: &str, impressions: f64, clicks: f64, cost: f64) -> AdRecord {
        AdRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            platform: platform.to_string(),
            impressions,
            clicks,
            cost,
            conversions: 1.0,
            revenue: cost * 2.0,
        }
    }

    #[test]
    fn platform_grouping_sums_and_recomputes() {
        let derived = derive_records(vec![
            row(4, "google", 1000.0, 50.0, 20.0),
            row(5, "google", 3000.0, 30.0, 30.0),
            row(4, "facebook", 500.0, 10.0, 5.0),
        ]);
        let rows = aggregate(&derived, GroupKey::Platform).unwrap();
        assert_eq!(rows.len(), 2);

        // Alphabetical order: facebook first.
        assert_eq!(rows[0].platform, "facebook");
        let google = &rows[1];
        assert_relative_eq!(google.impressions, 4000.0);
        assert_relative_eq!(google.clicks, 80.0);
        assert_relative_eq!(google.ctr, 80.0 / 4000.0);
        assert_relative_eq!(google.cpc, 50.0 / 80.0);
        assert_relative_eq!(google.cpm, 50.0 / 4000.0 * 1000.0);
        assert_relative_eq!(google.romi, 1.0);
    }

    #[test]
    fn weekday_rows_come_back_in_calendar_order() {
        // 2024-03-04 is a Monday; days 4..=10 cover a full week.
        let derived = derive_records(
            (4..=10)
                .map(|day| row(day, "google", 100.0, 10.0, 5.0))
                .collect(),
        );
        let rows = aggregate(&derived, GroupKey::PlatformWeekday).unwrap();
        let buckets: Vec<&str> = rows.iter().map(|r| r.bucket.as_deref().unwrap()).collect();
        assert_eq!(
            buckets,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
        assert_eq!(rows[0].weekday_ord, Some(1));
        assert_eq!(rows[6].weekday_ord, Some(7));
    }

    #[test]
    fn month_buckets_sort_chronologically() {
        let mut records = vec![row(4, "google", 100.0, 10.0, 5.0)];
        let mut later = row(4, "google", 200.0, 20.0, 10.0);
        later.date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        records.push(later);
        let rows = aggregate(&derive_records(records), GroupKey::PlatformMonth).unwrap();
        let buckets: Vec<&str> = rows.iter().map(|r| r.bucket.as_deref().unwrap()).collect();
        assert_eq!(buckets, ["2024-01", "2024-03"]);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let derived = derive_records(vec![
            row(4, "google", 1000.0, 50.0, 20.0),
            row(5, "facebook", 500.0, 10.0, 5.0),
        ]);
        let first = aggregate(&derived, GroupKey::Platform).unwrap();
        let second = aggregate(&derived, GroupKey::Platform).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_clicks_row_keeps_group_cpc_finite() {
        let derived = derive_records(vec![
            row(4, "google", 1000.0, 0.0, 20.0),
            row(5, "google", 1000.0, 40.0, 20.0),
        ]);
        assert!(derived[0].cpc.is_infinite());

        let rows = aggregate(&derived, GroupKey::Platform).unwrap();
        assert_relative_eq!(rows[0].cpc, 40.0 / 40.0);
    }

    #[test]
    fn all_zero_click_group_has_infinite_cpc() {
        let derived = derive_records(vec![row(4, "google", 1000.0, 0.0, 20.0)]);
        let rows = aggregate(&derived, GroupKey::Platform).unwrap();
        assert!(rows[0].cpc.is_infinite());
    }
}
