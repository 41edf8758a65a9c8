use aifield_engine::Hazard;

use crate::{Model, TrainingData, training::argmax};

const NEIGHBORS: usize = 5;

/// k-nearest neighbors with `k = 5`, Euclidean distance and uniform votes.
///
/// Distance ties keep training order.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    data: TrainingData,
}

impl Model for KNearestNeighbors {
    const NAME: &'static str = "KNN";

    fn fit(data: &TrainingData) -> Self {
        Self { data: data.clone() }
    }

    fn predict(&self, features: &[f64]) -> Hazard {
        let mut distances = self
            .data
            .iter()
            .map(|(row, label)| {
                let distance = row
                    .iter()
                    .zip(features)
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>();
                (distance, label)
            })
            .collect::<Vec<_>>();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut votes = [0.0; Hazard::LEN];
        for (_, label) in distances.iter().take(NEIGHBORS) {
            votes[label.index()] += 1.0;
        }
        argmax(&votes)
    }
}
