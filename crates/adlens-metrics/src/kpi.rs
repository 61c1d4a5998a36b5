//! Per-row KPI formulas and the derived record type.
//!
//! None of the formulas guard against zero denominators: a row with
//! `clicks = 0` produces an infinite CPC (or NaN for 0/0) and the value
//! propagates downstream. Aggregates recompute KPIs from group sums, so a
//! single degenerate row cannot poison a group figure.

use crate::buckets::{month_key, weekday_name, weekday_ordinal};
use adlens_data::AdRecord;
use serde::Serialize;

/// Click-through rate: `clicks / impressions`.
pub fn ctr(clicks: f64, impressions: f64) -> f64 {
    clicks / impressions
}

/// Cost per click: `cost / clicks`.
pub fn cpc(cost: f64, clicks: f64) -> f64 {
    cost / clicks
}

/// Cost per thousand impressions: `cost / impressions * 1000`.
pub fn cpm(cost: f64, impressions: f64) -> f64 {
    cost / impressions * 1000.0
}

/// Return on marketing investment: `(revenue - cost) / cost`.
pub fn romi(revenue: f64, cost: f64) -> f64 {
    (revenue - cost) / cost
}

/// An [`AdRecord`] with its per-row KPIs and time-bucket keys attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRecord {
    /// The source row.
    pub record: AdRecord,
    /// Click-through rate.
    pub ctr: f64,
    /// Cost per click.
    pub cpc: f64,
    /// Cost per thousand impressions.
    pub cpm: f64,
    /// Return on marketing investment.
    pub romi: f64,
    /// English weekday name of the row's date.
    pub weekday: &'static str,
    /// Calendar ordinal of the weekday, Monday = 1.
    pub weekday_ord: u32,
    /// Month bucket key, `YYYY-MM`.
    pub month: String,
}

impl DerivedRecord {
    /// Derive KPIs and bucket keys for one row.
    pub fn from_record(record: AdRecord) -> Self {
        let ctr = ctr(record.clicks, record.impressions);
        let cpc = cpc(record.cost, record.clicks);
        let cpm = cpm(record.cost, record.impressions);
        let romi = romi(record.revenue, record.cost);
        let weekday = weekday_name(record.date);
        let weekday_ord = weekday_ordinal(record.date);
        let month = month_key(record.date);
        Self {
            record,
            ctr,
            cpc,
            cpm,
            romi,
            weekday,
            weekday_ord,
            month,
        }
    }
}

/// Derive KPIs and bucket keys for every row of the dataset.
pub fn derive_records(records: Vec<AdRecord>) -> Vec<DerivedRecord> {
    records.into_iter().map(DerivedRecord::from_record).collect()
}
