use aifield_engine::{FeaturePool, FeatureVector, Hazard};
use aifield_stats::descriptive::DescriptiveStats;
use rand::{Rng, SeedableRng as _, seq::SliceRandom as _};
use rand_distr::{Distribution as _, Normal};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::DatasetError;

/// A feature vector together with its hazard class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub features: FeatureVector,
    #[serde(rename = "label")]
    pub hazard: Hazard,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDataset {
    feature_names: Vec<String>,
    samples: Vec<LabeledSample>,
}

/// Labeled samples sharing one feature width.
///
/// Datasets serialize as `{ "feature_names": [...], "samples": [{ "features":
/// [...], "label": 0 }, ...] }`. Deserialization checks that every sample has
/// one value per feature name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    feature_names: Vec<String>,
    samples: Vec<LabeledSample>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DatasetError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Self::new(raw.feature_names, raw.samples)
    }
}

/// Train and test partitions of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
}

impl Dataset {
    pub fn new(
        feature_names: Vec<String>,
        samples: Vec<LabeledSample>,
    ) -> Result<Self, DatasetError> {
        if feature_names.is_empty() {
            return Err(DatasetError::NoFeatures);
        }
        let expected = feature_names.len();
        if let Some((index, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, sample)| sample.features.len() != expected)
        {
            return Err(DatasetError::InconsistentWidth {
                index,
                expected,
                actual: sample.features.len(),
            });
        }
        Ok(Self::from_parts(feature_names, samples))
    }

    pub(crate) fn from_parts(feature_names: Vec<String>, samples: Vec<LabeledSample>) -> Self {
        Self {
            feature_names,
            samples,
        }
    }

    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.feature_names.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn samples(&self) -> &[LabeledSample] {
        &self.samples
    }

    pub fn class_samples(&self, hazard: Hazard) -> impl Iterator<Item = &LabeledSample> + '_ {
        self.samples.iter().filter(move |s| s.hazard == hazard)
    }

    /// Number of samples per class, indexed by [`Hazard::index`].
    #[must_use]
    pub fn class_counts(&self) -> [usize; Hazard::LEN] {
        let mut counts = [0; Hazard::LEN];
        for sample in &self.samples {
            counts[sample.hazard.index()] += 1;
        }
        counts
    }

    /// Synthesizes `samples_per_class` jittered copies of this dataset's samples per class.
    ///
    /// Each synthetic sample is a randomly chosen sample of the class plus
    /// Gaussian noise whose standard deviation is `noise_scale` times the
    /// class's standard deviation of that feature. Values are clamped at zero.
    pub fn augmented<R>(
        &self,
        samples_per_class: usize,
        noise_scale: f64,
        rng: &mut R,
    ) -> Result<Self, DatasetError>
    where
        R: Rng + ?Sized,
    {
        if !(noise_scale.is_finite() && noise_scale >= 0.0) {
            return Err(DatasetError::InvalidNoiseScale { scale: noise_scale });
        }

        let mut samples = Vec::with_capacity(samples_per_class * Hazard::LEN);
        for hazard in Hazard::ALL {
            let base = self.class_samples(hazard).collect::<Vec<_>>();
            if base.is_empty() {
                return Err(DatasetError::MissingClass { hazard });
            }
            let noise = (0..self.width())
                .map(|feature| {
                    let values = base.iter().map(|s| f64::from(s.features[feature]));
                    let std_dev = DescriptiveStats::new(values).map_or(0.0, |s| s.std_dev);
                    Normal::new(0.0, std_dev * noise_scale)
                        .map_err(|_| DatasetError::InvalidNoiseScale { scale: noise_scale })
                })
                .collect::<Result<Vec<_>, _>>()?;

            for _ in 0..samples_per_class {
                let source = base[rng.random_range(0..base.len())];
                #[expect(clippy::cast_possible_truncation)]
                let features = source
                    .features
                    .iter()
                    .zip(&noise)
                    .map(|(value, normal)| {
                        (f64::from(*value) + normal.sample(&mut *rng)).max(0.0) as f32
                    })
                    .collect();
                samples.push(LabeledSample { features, hazard });
            }
        }
        Ok(Self::from_parts(self.feature_names.clone(), samples))
    }

    /// Keeps a random `fraction` of each class, rounded to the nearest count.
    ///
    /// Samples keep their relative order.
    pub fn reduce<R>(&self, fraction: f64, rng: &mut R) -> Result<Self, DatasetError>
    where
        R: Rng + ?Sized,
    {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(DatasetError::InvalidFraction {
                name: "reduce fraction",
                value: fraction,
            });
        }
        let mut keep = vec![false; self.samples.len()];
        for hazard in Hazard::ALL {
            let mut indices = self
                .samples
                .iter()
                .enumerate()
                .filter(|(_, s)| s.hazard == hazard)
                .map(|(i, _)| i)
                .collect::<Vec<_>>();
            #[expect(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let amount = (indices.len() as f64 * fraction).round() as usize;
            indices.shuffle(rng);
            for i in indices.into_iter().take(amount) {
                keep[i] = true;
            }
        }
        let samples = self
            .samples
            .iter()
            .zip(keep)
            .filter_map(|(sample, keep)| keep.then(|| sample.clone()))
            .collect();
        Ok(Self::from_parts(self.feature_names.clone(), samples))
    }

    /// Shuffles the samples with `seed` and splits off `ceil(test_fraction * n)` as the test set.
    pub fn split(&self, test_fraction: f64, seed: u64) -> Result<TrainTestSplit, DatasetError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(DatasetError::InvalidFraction {
                name: "test fraction",
                value: test_fraction,
            });
        }
        let n = self.samples.len();
        #[expect(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let test_len = (n as f64 * test_fraction).ceil() as usize;
        if test_len == 0 || test_len >= n {
            return Err(DatasetError::TooSmallToSplit { len: n });
        }

        let mut order = (0..n).collect::<Vec<_>>();
        order.shuffle(&mut Pcg32::seed_from_u64(seed));
        let pick = |indices: &[usize]| {
            let samples = indices.iter().map(|&i| self.samples[i].clone()).collect();
            Self::from_parts(self.feature_names.clone(), samples)
        };
        let (test, train) = order.split_at(test_len);
        Ok(TrainTestSplit {
            train: pick(train),
            test: pick(test),
        })
    }

    /// Partitions the samples by class into a feature pool.
    #[must_use]
    pub fn feature_pool(&self) -> FeaturePool {
        let mut pool = FeaturePool::new(self.width());
        for sample in &self.samples {
            pool.push(sample.hazard, sample.features.clone())
                .expect("dataset widths are validated on construction");
        }
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iris;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_new_rejects_inconsistent_width() {
        let names = vec!["a".to_owned(), "b".to_owned()];
        let samples = vec![
            LabeledSample {
                features: vec![1.0, 2.0],
                hazard: Hazard::Empty,
            },
            LabeledSample {
                features: vec![1.0],
                hazard: Hazard::Mine,
            },
        ];
        assert_eq!(
            Dataset::new(names, samples),
            Err(DatasetError::InconsistentWidth {
                index: 1,
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(Dataset::new(vec![], vec![]), Err(DatasetError::NoFeatures));
    }

    #[test]
    fn test_json_uses_numeric_labels() {
        let dataset = Dataset::new(
            vec!["x".to_owned()],
            vec![LabeledSample {
                features: vec![0.5],
                hazard: Hazard::Bomb,
            }],
        )
        .unwrap();
        let json = serde_json::to_string(&dataset).unwrap();
        assert_eq!(
            json,
            r#"{"feature_names":["x"],"samples":[{"features":[0.5],"label":2}]}"#
        );
        assert_eq!(serde_json::from_str::<Dataset>(&json).unwrap(), dataset);

        let bad = r#"{"feature_names":["x"],"samples":[{"features":[0.5,1.0],"label":0}]}"#;
        assert!(serde_json::from_str::<Dataset>(bad).is_err());
        let bad = r#"{"feature_names":["x"],"samples":[{"features":[0.5],"label":3}]}"#;
        assert!(serde_json::from_str::<Dataset>(bad).is_err());
    }

    #[test]
    fn test_augmented_keeps_classes_apart() {
        let iris = iris();
        let augmented = iris.augmented(400, 0.5, &mut rng()).unwrap();
        assert_eq!(augmented.class_counts(), [400, 400, 400]);
        assert_eq!(augmented.width(), 4);
        assert!(
            augmented
                .samples()
                .iter()
                .flat_map(|s| s.features.iter())
                .all(|v| *v >= 0.0)
        );

        // petal length separates setosa from the other classes
        let max_setosa_petal = augmented
            .class_samples(Hazard::Empty)
            .map(|s| s.features[2])
            .fold(f32::MIN, f32::max);
        let min_virginica_petal = augmented
            .class_samples(Hazard::Bomb)
            .map(|s| s.features[2])
            .fold(f32::MAX, f32::min);
        assert!(max_setosa_petal < min_virginica_petal);
    }

    #[test]
    fn test_augmented_without_noise_copies_samples() {
        let iris = iris();
        let augmented = iris.augmented(10, 0.0, &mut rng()).unwrap();
        for sample in augmented.samples() {
            assert!(iris.samples().contains(sample));
        }
        assert!(iris.augmented(10, -1.0, &mut rng()).is_err());
    }

    #[test]
    fn test_augmented_requires_every_class() {
        let only_setosa = Dataset::new(
            vec!["x".to_owned()],
            vec![LabeledSample {
                features: vec![1.0],
                hazard: Hazard::Empty,
            }],
        )
        .unwrap();
        assert_eq!(
            only_setosa.augmented(5, 0.1, &mut rng()),
            Err(DatasetError::MissingClass {
                hazard: Hazard::Mine
            })
        );
    }

    #[test]
    fn test_reduce_per_class() {
        let iris = iris();
        let reduced = iris.reduce(0.1, &mut rng()).unwrap();
        assert_eq!(reduced.class_counts(), [5, 5, 5]);
        assert!(reduced.samples().iter().all(|s| iris.samples().contains(s)));
        assert_eq!(iris.reduce(1.0, &mut rng()).unwrap(), iris);
        assert!(iris.reduce(0.0, &mut rng()).is_err());
    }

    #[test]
    fn test_split_sizes_and_determinism() {
        let iris = iris();
        let split = iris.split(0.33, 42).unwrap();
        assert_eq!(split.test.len(), 50);
        assert_eq!(split.train.len(), 100);
        assert_eq!(split, iris.split(0.33, 42).unwrap());
        assert_ne!(split.test, iris.split(0.33, 7).unwrap().test);

        let tiny = iris.reduce(0.02, &mut rng()).unwrap();
        assert_eq!(tiny.len(), 3);
        assert!(matches!(
            tiny.split(0.99, 0),
            Err(DatasetError::TooSmallToSplit { len: 3 })
        ));
    }

    #[test]
    fn test_feature_pool_partitions_by_class() {
        let pool = iris().feature_pool();
        assert_eq!(pool.width(), 4);
        for hazard in Hazard::ALL {
            assert_eq!(pool.len(hazard), 50);
        }
        assert_eq!(pool.samples(Hazard::Empty)[0], [5.1_f32, 3.5, 1.4, 0.2]);
    }
}
