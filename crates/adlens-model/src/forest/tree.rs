//! Single regression tree grown by variance reduction.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Growth limits and sampling parameters for one tree.
#[derive(Debug, Clone)]
pub(crate) struct TreeParams {
    pub(crate) max_depth: usize,
    pub(crate) min_samples_split: usize,
    pub(crate) min_samples_leaf: usize,
    /// Features considered per split.
    pub(crate) max_features: usize,
    pub(crate) seed: u64,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted regression tree.
#[derive(Debug, Clone)]
pub(crate) struct RegressionTree {
    root: Node,
    /// Raw impurity decrease accumulated per feature, unnormalized. The
    /// forest sums these across trees and normalizes once.
    importances: Vec<f64>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    left: Vec<usize>,
    right: Vec<usize>,
    gain: f64,
}

impl RegressionTree {
    /// Grow a tree over the samples named by `indices` (which may repeat,
    /// as in a bootstrap draw).
    pub(crate) fn fit(
        rows: &[Vec<f64>],
        target: &[f64],
        indices: &[usize],
        n_features: usize,
        params: &TreeParams,
    ) -> Self {
        let mut builder = TreeBuilder {
            rows,
            target,
            params,
            rng: ChaCha8Rng::seed_from_u64(params.seed),
            importances: vec![0.0; n_features],
        };
        let root = builder.grow(indices, 0);
        Self {
            root,
            importances: builder.importances,
        }
    }

    pub(crate) fn predict_one(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    pub(crate) fn importances(&self) -> &[f64] {
        &self.importances
    }
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<f64>],
    target: &'a [f64],
    params: &'a TreeParams,
    rng: ChaCha8Rng,
    importances: Vec<f64>,
}

impl TreeBuilder<'_> {
    fn grow(&mut self, indices: &[usize], depth: usize) -> Node {
        let value = self.mean(indices);
        let impurity = self.variance(indices, value);

        if depth >= self.params.max_depth
            || indices.len() < self.params.min_samples_split
            || impurity < 1e-12
        {
            return Node::Leaf { value };
        }

        let Some(split) = self.best_split(indices, impurity) else {
            return Node::Leaf { value };
        };
        if split.left.len() < self.params.min_samples_leaf
            || split.right.len() < self.params.min_samples_leaf
        {
            return Node::Leaf { value };
        }

        self.importances[split.feature] += split.gain * indices.len() as f64;

        let left = self.grow(&split.left, depth + 1);
        let right = self.grow(&split.right, depth + 1);
        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Best variance-reducing split over a random feature subset, trying
    /// midpoints between consecutive distinct values as thresholds.
    fn best_split(&mut self, indices: &[usize], parent_impurity: f64) -> Option<SplitCandidate> {
        let n_features = self.importances.len();
        let mut candidates: Vec<usize> = (0..n_features).collect();
        candidates.shuffle(&mut self.rng);
        candidates.truncate(self.params.max_features.max(1));

        let mut best: Option<SplitCandidate> = None;
        let mut best_gain = 0.0;

        for &feature in &candidates {
            let mut values: Vec<f64> = indices.iter().map(|&i| self.rows[i][feature]).collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;
                let (left, right): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .copied()
                    .partition(|&i| self.rows[i][feature] <= threshold);
                if left.is_empty() || right.is_empty() {
                    continue;
                }

                let left_impurity = self.variance(&left, self.mean(&left));
                let right_impurity = self.variance(&right, self.mean(&right));
                let n = indices.len() as f64;
                let weighted = (left.len() as f64 * left_impurity
                    + right.len() as f64 * right_impurity)
                    / n;
                let gain = parent_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        left,
                        right,
                        gain,
                    });
                }
            }
        }

        best
    }

    fn mean(&self, indices: &[usize]) -> f64 {
        indices.iter().map(|&i| self.target[i]).sum::<f64>() / indices.len() as f64
    }

    fn variance(&self, indices: &[usize], mean: f64) -> f64 {
        indices
            .iter()
            .map(|&i| (self.target[i] - mean).powi(2))
            .sum::<f64>()
            / indices.len() as f64
    }
}
