use aifield_engine::Hazard;

use crate::{Model, TrainingData, training::argmax};

/// Predicts the most frequent training class regardless of the features.
#[derive(Debug, Clone)]
pub struct MostFrequent {
    class: Hazard,
}

impl Model for MostFrequent {
    const NAME: &'static str = "DummyClassifier";

    #[expect(clippy::cast_precision_loss)]
    fn fit(data: &TrainingData) -> Self {
        let counts = data.class_counts().map(|count| count as f64);
        Self {
            class: argmax(&counts),
        }
    }

    fn predict(&self, _features: &[f64]) -> Hazard {
        self.class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::training_accuracy;

    #[test]
    fn test_balanced_classes_predict_lowest_label() {
        let model = MostFrequent::fit(&crate::tests::iris_data());
        assert_eq!(model.predict(&[7.0, 3.1, 6.0, 2.3]), Hazard::Empty);
        assert!((training_accuracy::<MostFrequent>() - 1.0 / 3.0).abs() < 1e-12);
    }
}
