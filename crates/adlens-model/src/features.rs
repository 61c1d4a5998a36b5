//! Feature assembly from derived records.

use adlens_metrics::DerivedRecord;

/// Feature columns for the linear variant: raw volume and spend.
pub const LINEAR_FEATURES: [&str; 4] = ["impressions", "clicks", "cost", "conversions"];

/// Feature columns for the forest variant: per-row KPIs plus volume.
pub const FOREST_FEATURES: [&str; 6] =
    ["ctr", "cpc", "cpm", "conversions", "impressions", "clicks"];

/// A dense feature matrix with its target column (per-row ROMI).
///
/// Rows are stored as `Vec<f64>` per sample so tree splitting can index
/// features directly; the linear model reshapes into an `ndarray` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    /// Feature column names, in matrix column order.
    pub names: Vec<String>,
    /// One feature vector per sample.
    pub rows: Vec<Vec<f64>>,
    /// Target value (ROMI) per sample.
    pub target: Vec<f64>,
}

impl FeatureTable {
    /// Assemble the linear-variant features (see [`LINEAR_FEATURES`]).
    pub fn linear_features(records: &[DerivedRecord]) -> Self {
        Self {
            names: LINEAR_FEATURES.iter().map(|s| s.to_string()).collect(),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.record.impressions,
                        r.record.clicks,
                        r.record.cost,
                        r.record.conversions,
                    ]
                })
                .collect(),
            target: records.iter().map(|r| r.romi).collect(),
        }
    }

    /// Assemble the forest-variant features (see [`FOREST_FEATURES`]).
    pub fn forest_features(records: &[DerivedRecord]) -> Self {
        Self {
            names: FOREST_FEATURES.iter().map(|s| s.to_string()).collect(),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.ctr,
                        r.cpc,
                        r.cpm,
                        r.record.conversions,
                        r.record.impressions,
                        r.record.clicks,
                    ]
                })
                .collect(),
            target: records.iter().map(|r| r.romi).collect(),
        }
    }

    /// Number of samples.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Subset of the table at the given row indices, in index order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            target: indices.iter().map(|&i| self.target[i]).collect(),
        }
    }
}
