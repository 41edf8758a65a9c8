use aifield_engine::{FeaturePool, FeaturePoolProvider, Hazard};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{Dataset, DatasetError};

/// How the held-out feature pool is derived from base data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolOptions {
    /// Synthetic samples generated per class.
    pub samples_per_class: usize,
    /// Jitter relative to each class's feature standard deviation.
    pub noise_scale: f64,
    /// Share of each class kept after augmentation.
    pub reduce_fraction: f64,
    /// Share of the reduced data held out for the board.
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            samples_per_class: 1500,
            noise_scale: 0.5,
            reduce_fraction: 1.0,
            test_fraction: 0.33,
            seed: 42,
        }
    }
}

impl PoolOptions {
    /// Augments and reduces `base`, leaving the split to the caller.
    pub fn prepare(&self, base: &Dataset) -> Result<Dataset, DatasetError> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let augmented = base.augmented(self.samples_per_class, self.noise_scale, &mut rng)?;
        augmented.reduce(self.reduce_fraction, &mut rng)
    }
}

/// Feature pool made of the test split of a dataset.
///
/// Built once and handed to every board; the pool itself is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct HeldOutFeaturePool {
    pool: FeaturePool,
    train_len: usize,
}

impl HeldOutFeaturePool {
    /// Augments, reduces and splits `base` according to `options`.
    pub fn build(base: &Dataset, options: &PoolOptions) -> Result<Self, DatasetError> {
        let prepared = options.prepare(base)?;
        Self::from_dataset(&prepared, options.test_fraction, options.seed)
    }

    /// Splits a prepared dataset and keeps its test part.
    pub fn from_dataset(
        dataset: &Dataset,
        test_fraction: f64,
        seed: u64,
    ) -> Result<Self, DatasetError> {
        let split = dataset.split(test_fraction, seed)?;
        let pool = split.test.feature_pool();
        tracing::debug!(
            train = split.train.len(),
            empty = pool.len(Hazard::Empty),
            mine = pool.len(Hazard::Mine),
            bomb = pool.len(Hazard::Bomb),
            "held-out feature pool built"
        );
        Ok(Self {
            pool,
            train_len: split.train.len(),
        })
    }

    #[must_use]
    pub fn pool(&self) -> &FeaturePool {
        &self.pool
    }

    /// Size of the discarded training part of the split.
    #[must_use]
    pub fn train_len(&self) -> usize {
        self.train_len
    }
}

impl FeaturePoolProvider for HeldOutFeaturePool {
    fn feature_pool(&self) -> FeaturePool {
        self.pool.clone()
    }
}
