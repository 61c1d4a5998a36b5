//! Seeded train/test partitioning.

use crate::error::{ModelError, Result};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Row indices of the two partitions produced by [`train_test_split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    /// Training rows.
    pub train: Vec<usize>,
    /// Held-out rows.
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` with a seeded generator and split off the last
/// `test_fraction` of rows as the held-out partition.
///
/// The same `(n_rows, test_fraction, seed)` triple always produces the
/// same partitioning. Fails when either partition would be empty.
pub fn train_test_split(n_rows: usize, test_fraction: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ModelError::InvalidTestFraction(test_fraction));
    }

    let n_test = ((n_rows as f64) * test_fraction).round() as usize;
    if n_test == 0 || n_test >= n_rows {
        return Err(ModelError::NotEnoughRows { rows: n_rows });
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices[..n_rows - n_test].to_vec();
    let test = indices[n_rows - n_test..].to_vec();
    Ok(TrainTestSplit { train, test })
}
