use std::fmt;

use aifield_engine::{BoxedHazardPredictor, Hazard, HazardPredictor};

use crate::TrainingData;

/// A fitted classification model.
///
/// Fitting must be deterministic: fitting twice on the same data yields
/// models that predict identically.
pub trait Model: fmt::Debug + Sized {
    /// Identifier the model is registered under.
    const NAME: &'static str;

    fn fit(data: &TrainingData) -> Self;

    fn predict(&self, features: &[f64]) -> Hazard;
}

/// A [`HazardPredictor`] refitting a [`Model`] on fixed training data.
#[derive(Debug, Clone)]
pub struct Classifier<M> {
    data: TrainingData,
    model: M,
}

impl<M> Classifier<M>
where
    M: Model,
{
    /// Fits the model once so predictions are available before the first retrain.
    #[must_use]
    pub fn new(data: TrainingData) -> Self {
        let model = M::fit(&data);
        Self { data, model }
    }

    #[must_use]
    pub fn boxed(data: TrainingData) -> BoxedHazardPredictor
    where
        M: 'static,
    {
        Box::new(Self::new(data))
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M> HazardPredictor for Classifier<M>
where
    M: Model,
{
    fn name(&self) -> &str {
        M::NAME
    }

    fn width(&self) -> usize {
        self.data.width()
    }

    fn train(&mut self) {
        self.model = M::fit(&self.data);
    }

    fn predict(&self, features: &[f32]) -> Hazard {
        let features = features.iter().copied().map(f64::from).collect::<Vec<_>>();
        self.model.predict(&features)
    }
}
