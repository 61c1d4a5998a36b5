//! Time-bucket keys for aggregation.

use chrono::{Datelike, NaiveDate};

/// Weekday names in calendar order, Monday first. Charts and aggregate
/// sorting reindex weekday buckets into this order.
pub const WEEKDAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// English weekday name for a date.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_ORDER[date.weekday().num_days_from_monday() as usize]
}

/// Calendar ordinal of a date's weekday, Monday = 1 through Sunday = 7.
pub fn weekday_ordinal(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// Month bucket key, `YYYY-MM`. Lexicographic order of these keys is
/// chronological order, so month aggregates sort without date arithmetic.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
