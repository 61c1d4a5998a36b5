//! KPI derivation and aggregation for the AdLens analytics pipeline.
//!
//! Takes loaded [`adlens_data::AdRecord`] rows, attaches per-row marketing
//! KPIs (CTR, CPC, CPM, ROMI) and time-bucket keys (weekday, calendar
//! month), and reduces them into per-group aggregate rows with a polars
//! lazy group-by.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod buckets;
pub mod error;
pub mod kpi;

pub use aggregate::{AggregateRow, GroupKey, aggregate};
pub use buckets::{WEEKDAY_ORDER, month_key, weekday_name, weekday_ordinal};
pub use error::{MetricsError, Result};
pub use kpi::{DerivedRecord, cpc, cpm, ctr, derive_records, romi};
