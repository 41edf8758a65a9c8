//! Seam between the simulation and the classifier that predicts hazards.

use std::fmt;

use crate::{Hazard, UnsupportedPredictorError};

/// Predicts the hazard of a cell from its feature vector.
///
/// The simulation calls [`Self::train`] before every prediction, so training
/// must be idempotent: a retrain yields the same model as the previous one.
pub trait HazardPredictor: fmt::Debug {
    /// Identifier the predictor was created from.
    fn name(&self) -> &str;

    /// Length of the feature vectors the predictor was trained on.
    fn width(&self) -> usize;

    /// Fits the model from scratch on its training data.
    fn train(&mut self);

    /// Predicts the hazard class for a single feature vector.
    fn predict(&self, features: &[f32]) -> Hazard;
}

pub type BoxedHazardPredictor = Box<dyn HazardPredictor>;

/// Resolves classifier identifiers to predictors.
pub trait PredictorFactory {
    /// Identifiers this factory can build.
    fn supported_names(&self) -> Vec<&'static str>;

    fn create(&self, name: &str) -> Result<BoxedHazardPredictor, UnsupportedPredictorError>;
}
