//! Shuffled train/test split

use crate::error::{Result, ScoringError};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Row-aligned train and test partitions
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    /// Number of training rows
    pub fn n_train(&self) -> usize {
        self.train_indices.len()
    }

    /// Number of test rows
    pub fn n_test(&self) -> usize {
        self.test_indices.len()
    }
}

/// Shuffle `0..n_samples` with a seeded ChaCha8 stream and cut it in two.
///
/// The test set gets `ceil(test_size * n_samples)` rows from the front of
/// the permutation; the remaining rows train. Both sides must be non-empty.
pub fn shuffle_split_indices(
    n_samples: usize,
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ScoringError::ValidationError(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let n_test = (test_size * n_samples as f64).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(ScoringError::ValidationError(format!(
            "With n_samples={}, test_size={} the resulting train set would be empty",
            n_samples, test_size
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

/// Split features and labels with the same shuffled partition
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    if x.nrows() != y.len() {
        return Err(ScoringError::ShapeError {
            expected: format!("y length = {}", x.nrows()),
            actual: format!("y length = {}", y.len()),
        });
    }

    let (train_indices, test_indices) = shuffle_split_indices(x.nrows(), test_size, seed)?;

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), &train_indices),
        x_test: x.select(Axis(0), &test_indices),
        y_train: y.select(Axis(0), &train_indices),
        y_test: y.select(Axis(0), &test_indices),
        train_indices,
        test_indices,
    })
}
