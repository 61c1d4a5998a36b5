//! CSV export of aggregate tables.
//!
//! Tables are flattened into serde rows so the csv crate writes the
//! header from field names. KPI headers stay uppercase, matching the
//! column names the summaries and downstream spreadsheets use.

use crate::error::Result;
use adlens_metrics::AggregateRow;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct PlatformMetricsRow<'a> {
    platform: &'a str,
    impressions: f64,
    clicks: f64,
    cost: f64,
    conversions: f64,
    revenue: f64,
    #[serde(rename = "CTR")]
    ctr: f64,
    #[serde(rename = "CPC")]
    cpc: f64,
    #[serde(rename = "CPM")]
    cpm: f64,
    #[serde(rename = "ROMI")]
    romi: f64,
}

#[derive(Debug, Serialize)]
struct DayPlatformMetricsRow<'a> {
    day_of_week: &'a str,
    platform: &'a str,
    impressions: f64,
    clicks: f64,
    cost: f64,
    conversions: f64,
    revenue: f64,
    #[serde(rename = "CTR")]
    ctr: f64,
    #[serde(rename = "CPC")]
    cpc: f64,
    #[serde(rename = "CPM")]
    cpm: f64,
    #[serde(rename = "ROMI")]
    romi: f64,
}

/// Write the per-platform aggregate table.
pub fn write_platform_metrics(path: impl AsRef<Path>, rows: &[AggregateRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(PlatformMetricsRow {
            platform: &row.platform,
            impressions: row.impressions,
            clicks: row.clicks,
            cost: row.cost,
            conversions: row.conversions,
            revenue: row.revenue,
            ctr: row.ctr,
            cpc: row.cpc,
            cpm: row.cpm,
            romi: row.romi,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-(day-of-week, platform) aggregate table.
pub fn write_day_platform_metrics(path: impl AsRef<Path>, rows: &[AggregateRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(DayPlatformMetricsRow {
            day_of_week: row.bucket.as_deref().unwrap_or(""),
            platform: &row.platform,
            impressions: row.impressions,
            clicks: row.clicks,
            cost: row.cost,
            conversions: row.conversions,
            revenue: row.revenue,
            ctr: row.ctr,
            cpc: row.cpc,
            cpm: row.cpm,
            romi: row.romi,
        })?;
    }
    writer.flush()?;
    Ok(())
}
