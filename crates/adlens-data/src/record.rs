//! Row type for the advertising dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the advertising dataset.
///
/// Well-formed data satisfies `impressions >= clicks >= 0` and non-negative
/// `cost`/`revenue`, but nothing enforces this: a zero denominator flows
/// through the KPI formulas under IEEE-754 semantics (`clicks = 0` makes
/// CPC infinite rather than aborting the run).
///
/// Numeric columns are `f64` so that downstream sums and ratios need no
/// casting; counts in the source data are whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRecord {
    /// Calendar date of the row (ISO `YYYY-MM-DD` in the source file).
    pub date: NaiveDate,
    /// Advertising platform (channel) name.
    pub platform: String,
    /// Ad impressions served.
    pub impressions: f64,
    /// Clicks received.
    pub clicks: f64,
    /// Spend in account currency.
    pub cost: f64,
    /// Attributed conversions.
    pub conversions: f64,
    /// Attributed revenue in account currency.
    pub revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_named_fields() {
        let json = r#"{
            "date": "2024-03-04",
            "platform": "google",
            "impressions": 1200.0,
            "clicks": 48.0,
            "cost": 36.5,
            "conversions": 5.0,
            "revenue": 120.0
        }"#;
        let record: AdRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.platform, "google");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(record.clicks, 48.0);
    }
}
