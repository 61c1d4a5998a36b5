//! ROMI regression models for the AdLens analytics pipeline.
//!
//! Two model variants, both predicting per-row ROMI from campaign
//! features over a seeded train/test split:
//!
//! - [`linear`]: ordinary least-squares regression over volume and spend
//!   columns, reporting R² on the held-out partition and the fitted
//!   coefficients.
//! - [`forest`]: a 100-tree random forest of regression trees over the
//!   KPI and volume columns, reporting R² plus normalized, rank-ordered
//!   feature importances.

#![forbid(unsafe_code)]

pub mod error;
pub mod features;
pub mod forest;
pub mod linear;
pub mod score;
pub mod split;

pub use error::{ModelError, Result};
pub use features::{FOREST_FEATURES, FeatureTable, LINEAR_FEATURES};
pub use forest::{ForestConfig, ForestReport, RandomForest, fit_forest};
pub use linear::{LinearReport, fit_linear};
pub use score::r2_score;
pub use split::{TrainTestSplit, train_test_split};
