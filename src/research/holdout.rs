//! Seeded train/test splits.
use serde::{Serialize, Deserialize};
use tracing::{debug, instrument};

use crate::TreeError;
use crate::common::checker;
use crate::dataset::Dataset;


/// Splits a dataset into a training and a test part.
///
/// The dataset is shuffled with the seed, then the first
/// `round(n * train_fraction)` instances form the training part
/// and the rest form the test part.
/// The same seed always yields the same split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldoutSplit {
    train_fraction: f64,
    seed: u64,
}


impl HoldoutSplit {
    /// Construct a split with the given training fraction and seed `0`.
    pub fn new(train_fraction: f64) -> Self {
        Self { train_fraction, seed: 0 }
    }


    /// Set the seed of the shuffle.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Returns the training fraction.
    pub fn train_fraction(&self) -> f64 {
        self.train_fraction
    }


    /// Returns `(train, test)`.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidTrainFraction`]
    /// if the fraction is not in `(0, 1)`.
    #[instrument(
        skip_all,
        fields(train_fraction = self.train_fraction, seed = self.seed)
    )]
    pub fn split(&self, data: &Dataset) -> Result<(Dataset, Dataset), TreeError> {
        checker::check_train_fraction(self.train_fraction)?;

        let n = data.len();
        let n_train = ((n as f64 * self.train_fraction).round() as usize).min(n);
        let shuffled = data.shuffled(self.seed);

        debug!(
            n_train,
            n_test = n - n_train,
            "holdout split"
        );

        Ok((shuffled.range(0, n_train), shuffled.range(n_train, n)))
    }
}
