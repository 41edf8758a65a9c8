//! Labeled feature data for the hazard predictor and the board.
//!
//! The pipeline mirrors how the minefield is stocked:
//!
//! 1. **Base data** ([`iris`]): 150 Iris samples, one class per hazard
//! 2. **Augmentation** ([`Dataset::augmented`]): jittered synthetic samples per class
//! 3. **Reduction** ([`Dataset::reduce`]): a random fraction of each class
//! 4. **Split** ([`Dataset::split`]): seeded train/test partition
//! 5. **Feature pool** ([`HeldOutFeaturePool`]): the test split, partitioned by class
//!
//! Predictors train on the base data while the board draws its cell features
//! from the held-out pool.
//!
//! # Example
//!
//! ```
//! use aifield_dataset::{HeldOutFeaturePool, PoolOptions, iris};
//! use aifield_engine::{FeaturePoolProvider as _, Hazard};
//!
//! let options = PoolOptions {
//!     samples_per_class: 300,
//!     ..PoolOptions::default()
//! };
//! let pool = HeldOutFeaturePool::build(&iris(), &options).unwrap();
//! let feature_pool = pool.feature_pool();
//! assert_eq!(feature_pool.width(), 4);
//! assert_eq!(feature_pool.total_len(), 297);
//! ```

pub use self::{dataset::*, iris::*, pool::*};

mod dataset;
mod iris;
mod pool;

use aifield_engine::Hazard;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("dataset has no features")]
    NoFeatures,
    #[display("sample {index} has {actual} features, expected {expected}")]
    InconsistentWidth {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[display("dataset has no samples of class {hazard}")]
    MissingClass { hazard: Hazard },
    #[display("{name} must lie in (0, 1], got {value}")]
    InvalidFraction { name: &'static str, value: f64 },
    #[display("noise scale must be finite and non-negative, got {scale}")]
    InvalidNoiseScale { scale: f64 },
    #[display("dataset of {len} samples is too small to split")]
    TooSmallToSplit { len: usize },
}
