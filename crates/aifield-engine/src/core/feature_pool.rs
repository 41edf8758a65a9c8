use std::array;

use crate::{FeatureWidthMismatchError, Hazard};

/// A fixed-width numeric description of a single board cell.
pub type FeatureVector = Vec<f32>;

/// Held-out feature vectors partitioned by the hazard class they belong to.
///
/// Every vector in the pool has the same width. The board draws from the pool
/// without replacement, so each class must hold at least as many vectors as
/// the board has cells of that class.
///
/// # Example
///
/// ```
/// use aifield_engine::{FeaturePool, Hazard};
///
/// let mut pool = FeaturePool::new(2);
/// pool.push(Hazard::Mine, vec![1.0, 2.0]).unwrap();
/// assert_eq!(pool.len(Hazard::Mine), 1);
/// assert!(pool.push(Hazard::Bomb, vec![1.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePool {
    width: usize,
    classes: [Vec<FeatureVector>; Hazard::LEN],
}

impl FeaturePool {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            classes: array::from_fn(|_| vec![]),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn push(
        &mut self,
        hazard: Hazard,
        features: FeatureVector,
    ) -> Result<(), FeatureWidthMismatchError> {
        if features.len() != self.width {
            return Err(FeatureWidthMismatchError {
                expected: self.width,
                actual: features.len(),
            });
        }
        self.classes[hazard.index()].push(features);
        Ok(())
    }

    #[must_use]
    pub fn samples(&self, hazard: Hazard) -> &[FeatureVector] {
        &self.classes[hazard.index()]
    }

    #[must_use]
    pub fn len(&self, hazard: Hazard) -> usize {
        self.classes[hazard.index()].len()
    }

    #[must_use]
    pub fn total_len(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }
}

/// Supplies the class-partitioned feature pool a board draws from.
pub trait FeaturePoolProvider {
    fn feature_pool(&self) -> FeaturePool;
}

impl FeaturePoolProvider for FeaturePool {
    fn feature_pool(&self) -> FeaturePool {
        self.clone()
    }
}
