//! Hazard predictors and the registry resolving classifier identifiers.
//!
//! Every classifier implements [`Model`] and is wrapped in a [`Classifier`],
//! which keeps its training data and refits from scratch on each
//! [`HazardPredictor::train`] call. Fitting is deterministic, so retraining
//! never changes predictions.
//!
//! | identifier           | model                     |
//! |----------------------|---------------------------|
//! | `KNN`                | [`KNearestNeighbors`]     |
//! | `GaussianNB`         | [`GaussianNaiveBayes`]    |
//! | `DecisionTree`       | [`DecisionTree`]          |
//! | `RandomForest`       | [`RandomForest`]          |
//! | `LogisticRegression` | [`LogisticRegression`]    |
//! | `LinearSVC`          | [`LinearSvc`]             |
//! | `DummyClassifier`    | [`MostFrequent`]          |
//!
//! # Example
//!
//! ```
//! use aifield_classifier::ClassifierRegistry;
//! use aifield_engine::{Hazard, HazardPredictor as _, PredictorFactory as _};
//!
//! let registry = ClassifierRegistry::iris();
//! let predictor = registry.create("KNN").unwrap();
//! assert_eq!(predictor.predict(&[5.0, 3.4, 1.5, 0.2]), Hazard::Empty);
//! assert!(registry.create("SVM").is_err());
//! ```
//!
//! [`HazardPredictor::train`]: aifield_engine::HazardPredictor::train

use aifield_dataset::{Dataset, iris};
use aifield_engine::{BoxedHazardPredictor, PredictorFactory, UnsupportedPredictorError};

pub use self::{
    classifier::*, dummy::*, linear::*, naive_bayes::*, neighbors::*, training::TrainingData,
    tree::*,
};

mod classifier;
mod dummy;
mod linear;
mod naive_bayes;
mod neighbors;
mod training;
mod tree;

/// A registered classifier constructor.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierEntry {
    pub name: &'static str,
    pub factory: fn(TrainingData) -> BoxedHazardPredictor,
}

impl ClassifierEntry {
    const fn new(name: &'static str, factory: fn(TrainingData) -> BoxedHazardPredictor) -> Self {
        Self { name, factory }
    }

    const fn of<M>() -> Self
    where
        M: Model + 'static,
    {
        Self::new(M::NAME, Classifier::<M>::boxed)
    }
}

pub const CLASSIFIERS: &[ClassifierEntry] = &[
    ClassifierEntry::of::<KNearestNeighbors>(),
    ClassifierEntry::of::<GaussianNaiveBayes>(),
    ClassifierEntry::of::<DecisionTree>(),
    ClassifierEntry::of::<RandomForest>(),
    ClassifierEntry::of::<LogisticRegression>(),
    ClassifierEntry::of::<LinearSvc>(),
    ClassifierEntry::of::<MostFrequent>(),
];

/// Builds registered classifiers trained on a fixed dataset.
#[derive(Debug, Clone)]
pub struct ClassifierRegistry {
    training: TrainingData,
}

impl ClassifierRegistry {
    #[must_use]
    pub fn new(training: &Dataset) -> Self {
        Self {
            training: TrainingData::from(training),
        }
    }

    /// Registry training on the embedded Iris data.
    #[must_use]
    pub fn iris() -> Self {
        Self::new(&iris())
    }

    #[must_use]
    pub fn training(&self) -> &TrainingData {
        &self.training
    }

    fn entry(name: &str) -> Option<&'static ClassifierEntry> {
        CLASSIFIERS.iter().find(|entry| entry.name == name)
    }
}

impl PredictorFactory for ClassifierRegistry {
    fn supported_names(&self) -> Vec<&'static str> {
        CLASSIFIERS.iter().map(|entry| entry.name).collect()
    }

    fn create(&self, name: &str) -> Result<BoxedHazardPredictor, UnsupportedPredictorError> {
        let entry = Self::entry(name).ok_or_else(|| UnsupportedPredictorError {
            name: name.to_owned(),
        })?;
        tracing::debug!(classifier = entry.name, rows = self.training.len(), "creating predictor");
        Ok((entry.factory)(self.training.clone()))
    }
}

#[cfg(test)]
mod tests {
    use aifield_engine::{
        FeaturePool, Hazard, HazardPredictor as _, Simulation, SimulationConfig, SimulationError,
        SimulationSeed,
    };

    use super::*;

    pub(crate) fn iris_data() -> TrainingData {
        TrainingData::from(&iris())
    }

    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn training_accuracy<M>() -> f64
    where
        M: Model,
    {
        let data = iris_data();
        let model = M::fit(&data);
        let correct = data
            .iter()
            .filter(|(row, label)| model.predict(row) == *label)
            .count();
        correct as f64 / data.len() as f64
    }

    #[test]
    fn test_supported_names() {
        let registry = ClassifierRegistry::iris();
        assert_eq!(
            registry.supported_names(),
            [
                "KNN",
                "GaussianNB",
                "DecisionTree",
                "RandomForest",
                "LogisticRegression",
                "LinearSVC",
                "DummyClassifier",
            ]
        );
    }

    #[test]
    fn test_unsupported_names() {
        let registry = ClassifierRegistry::iris();
        for name in ["GradientBoosting", "SVM", "knn", ""] {
            let err = registry.create(name).unwrap_err();
            assert_eq!(err.name, name);
        }
    }

    #[test]
    fn test_created_predictor_reports_its_name() {
        let registry = ClassifierRegistry::iris();
        for name in registry.supported_names() {
            let predictor = registry.create(name).unwrap();
            assert_eq!(predictor.name(), name);
        }
    }

    #[test]
    fn test_retraining_keeps_predictions() {
        let registry = ClassifierRegistry::iris();
        let samples = [
            [5.0_f32, 3.4, 1.5, 0.2],
            [6.0, 2.8, 4.3, 1.3],
            [6.3, 2.8, 5.1, 1.5],
            [7.0, 3.1, 6.0, 2.3],
        ];
        for name in ["KNN", "DecisionTree", "RandomForest", "LogisticRegression"] {
            let mut predictor = registry.create(name).unwrap();
            let before = samples.map(|s| predictor.predict(&s));
            predictor.train();
            predictor.train();
            let after = samples.map(|s| predictor.predict(&s));
            assert_eq!(before, after, "{name}");
        }
    }

    #[test]
    fn test_predicts_obvious_samples() {
        let registry = ClassifierRegistry::iris();
        for name in ["KNN", "GaussianNB", "DecisionTree", "RandomForest", "LogisticRegression"] {
            let predictor = registry.create(name).unwrap();
            assert_eq!(predictor.predict(&[5.0, 3.4, 1.5, 0.2]), Hazard::Empty, "{name}");
            assert_eq!(predictor.predict(&[7.0, 3.1, 6.0, 2.3]), Hazard::Bomb, "{name}");
        }
    }

    #[test]
    fn test_predictor_width_follows_training_data() {
        let registry = ClassifierRegistry::iris();
        for name in registry.supported_names() {
            assert_eq!(registry.create(name).unwrap().width(), 4, "{name}");
        }
    }

    #[test]
    fn test_simulation_rejects_pool_of_other_width() {
        let mut pool = FeaturePool::new(2);
        for hazard in Hazard::ALL {
            for i in 0..100 {
                pool.push(hazard, vec![i as f32, 1.0]).unwrap();
            }
        }
        let config = SimulationConfig {
            size: 5,
            classifier: "DecisionTree".to_owned(),
            seed: Some(SimulationSeed::from_u128(3)),
            ..SimulationConfig::default()
        };
        let err = Simulation::new(&config, &pool, &ClassifierRegistry::iris()).unwrap_err();
        assert!(matches!(err, SimulationError::FeatureWidthMismatch(_)), "{err}");
    }
}
