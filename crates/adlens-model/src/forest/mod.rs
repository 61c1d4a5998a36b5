//! Random forest ROMI regression.
//!
//! An ensemble of variance-reduction regression trees, each grown on a
//! seeded bootstrap draw with a random feature subset per split. Feature
//! importances are impurity decreases summed across trees and normalized
//! to sum to one.

mod tree;

use crate::error::{ModelError, Result};
use crate::features::FeatureTable;
use crate::score::r2_score;
use crate::split::TrainTestSplit;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tree::{RegressionTree, TreeParams};

/// Random forest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Trees in the ensemble.
    pub n_trees: usize,
    /// Maximum depth of each tree.
    pub max_depth: usize,
    /// Minimum samples required to attempt a split.
    pub min_samples_split: usize,
    /// Minimum samples in each child of a split.
    pub min_samples_leaf: usize,
    /// Features considered per split; defaults to `n_features / 3`,
    /// floored at 1.
    pub max_features: Option<usize>,
    /// Seed for bootstrap draws and feature subsampling.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

/// A fitted random forest.
#[derive(Debug)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
    feature_names: Vec<String>,
    importances: Vec<f64>,
}

impl RandomForest {
    /// Create an unfitted forest.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_names: Vec::new(),
            importances: Vec::new(),
        }
    }

    /// Fit the ensemble on the given table. Trees are grown in parallel;
    /// per-tree seeds derive from the configured seed, so fitting is
    /// deterministic regardless of thread scheduling.
    pub fn fit(&mut self, table: &FeatureTable) -> Result<()> {
        let n_rows = table.n_rows();
        if n_rows == 0 {
            return Err(ModelError::NotEnoughRows { rows: 0 });
        }

        let n_features = table.n_features();
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features / 3).max(1));

        self.feature_names = table.names.clone();
        let config = &self.config;
        let trees: Vec<RegressionTree> = (0..config.n_trees)
            .into_par_iter()
            .map(|tree_idx| {
                let seed = config.seed.wrapping_add(tree_idx as u64);
                let indices = bootstrap_indices(n_rows, seed);
                let params = TreeParams {
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split,
                    min_samples_leaf: config.min_samples_leaf,
                    max_features,
                    seed,
                };
                RegressionTree::fit(&table.rows, &table.target, &indices, n_features, &params)
            })
            .collect();
        self.trees = trees;

        let mut importances = vec![0.0; n_features];
        for tree in &self.trees {
            for (total, &imp) in importances.iter_mut().zip(tree.importances()) {
                *total += imp;
            }
        }
        let sum: f64 = importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut importances {
                *imp /= sum;
            }
        }
        self.importances = importances;

        Ok(())
    }

    /// Ensemble prediction for one feature vector: mean of tree outputs.
    pub fn predict_one(&self, row: &[f64]) -> f64 {
        self.trees.iter().map(|t| t.predict_one(row)).sum::<f64>() / self.trees.len() as f64
    }

    /// Ensemble predictions for many rows.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.par_iter().map(|row| self.predict_one(row)).collect()
    }

    /// Normalized per-feature importances, in feature order.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    /// Feature importances paired with names, most important first.
    pub fn importance_ranking(&self) -> Vec<(String, f64)> {
        let mut ranking: Vec<(String, f64)> = self
            .feature_names
            .iter()
            .cloned()
            .zip(self.importances.iter().copied())
            .collect();
        ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranking
    }
}

/// Fit summary for the forest variant.
#[derive(Debug, Clone, Serialize)]
pub struct ForestReport {
    /// R² on the held-out partition.
    pub r_squared: f64,
    /// Normalized feature importances, most important first.
    pub importances: Vec<(String, f64)>,
}

/// Fit a forest on the training partition and score it on the held-out
/// one.
pub fn fit_forest(
    table: &FeatureTable,
    split: &TrainTestSplit,
    config: ForestConfig,
) -> Result<ForestReport> {
    let train = table.select(&split.train);
    let test = table.select(&split.test);

    let mut forest = RandomForest::new(config);
    forest.fit(&train)?;

    let predicted = forest.predict(&test.rows);
    Ok(ForestReport {
        r_squared: r2_score(&test.target, &predicted),
        importances: forest.importance_ranking(),
    })
}

/// Bootstrap draw of `n` row indices, with replacement.
fn bootstrap_indices(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}
