use aifield_engine::Hazard;

use crate::{
    Model, TrainingData,
    training::{Standardizer, argmax},
};

/// Inverse regularization strength shared by the linear models.
const C: f64 = 1.0;

/// Linear decision functions over standardized features.
#[derive(Debug, Clone)]
struct LinearScores {
    standardizer: Standardizer,
    weights: [Vec<f64>; Hazard::LEN],
    bias: [f64; Hazard::LEN],
}

impl LinearScores {
    fn zeros(data: &TrainingData) -> (Self, Vec<Vec<f64>>) {
        let standardizer = Standardizer::fit(data);
        let rows = data
            .rows()
            .iter()
            .map(|row| standardizer.transform(row))
            .collect();
        let scores = Self {
            standardizer,
            weights: std::array::from_fn(|_| vec![0.0; data.width()]),
            bias: [0.0; Hazard::LEN],
        };
        (scores, rows)
    }

    fn raw_scores(&self, row: &[f64]) -> [f64; Hazard::LEN] {
        std::array::from_fn(|k| {
            self.bias[k]
                + self.weights[k]
                    .iter()
                    .zip(row)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
        })
    }

    fn predict(&self, features: &[f64]) -> Hazard {
        argmax(&self.raw_scores(&self.standardizer.transform(features)))
    }
}

fn softmax(scores: [f64; Hazard::LEN]) -> [f64; Hazard::LEN] {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp = scores.map(|s| (s - max).exp());
    let total = exp.iter().sum::<f64>();
    exp.map(|e| e / total)
}

/// Multinomial logistic regression with L2 penalty, fitted by gradient descent.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    scores: LinearScores,
}

impl LogisticRegression {
    const ITERATIONS: usize = 500;
    const LEARNING_RATE: f64 = 0.5;

    /// Class probabilities for a raw feature vector.
    #[must_use]
    pub fn probabilities(&self, features: &[f64]) -> [f64; Hazard::LEN] {
        softmax(
            self.scores
                .raw_scores(&self.scores.standardizer.transform(features)),
        )
    }
}

impl Model for LogisticRegression {
    const NAME: &'static str = "LogisticRegression";

    #[expect(clippy::cast_precision_loss)]
    fn fit(data: &TrainingData) -> Self {
        let (mut scores, rows) = LinearScores::zeros(data);
        let n = data.len().max(1) as f64;
        let penalty = 1.0 / (C * n);

        for _ in 0..Self::ITERATIONS {
            let mut grad_w: [Vec<f64>; Hazard::LEN] =
                std::array::from_fn(|k| scores.weights[k].iter().map(|w| penalty * w).collect());
            let mut grad_b = [0.0; Hazard::LEN];
            for (row, label) in rows.iter().zip(data.labels()) {
                let probs = softmax(scores.raw_scores(row));
                for (k, p) in probs.iter().enumerate() {
                    let target = if label.index() == k { 1.0 } else { 0.0 };
                    let error = (p - target) / n;
                    grad_b[k] += error;
                    for (g, x) in grad_w[k].iter_mut().zip(row) {
                        *g += error * x;
                    }
                }
            }
            let params = scores.bias.iter_mut().zip(&mut scores.weights);
            for ((bias, weights), (gb, gw)) in params.zip(grad_b.iter().zip(&grad_w)) {
                *bias -= Self::LEARNING_RATE * gb;
                for (w, g) in weights.iter_mut().zip(gw) {
                    *w -= Self::LEARNING_RATE * g;
                }
            }
        }
        Self { scores }
    }

    fn predict(&self, features: &[f64]) -> Hazard {
        self.scores.predict(features)
    }
}

/// One-vs-rest linear support vector classifier with squared hinge loss.
#[derive(Debug, Clone)]
pub struct LinearSvc {
    scores: LinearScores,
}

impl LinearSvc {
    const ITERATIONS: usize = 1000;
    const LEARNING_RATE: f64 = 0.1;
}

impl Model for LinearSvc {
    const NAME: &'static str = "LinearSVC";

    #[expect(clippy::cast_precision_loss)]
    fn fit(data: &TrainingData) -> Self {
        let (mut scores, rows) = LinearScores::zeros(data);
        let n = data.len().max(1) as f64;
        let penalty = 1.0 / (C * n);

        for k in 0..Hazard::LEN {
            let targets = data
                .labels()
                .iter()
                .map(|label| if label.index() == k { 1.0 } else { -1.0 })
                .collect::<Vec<f64>>();
            for _ in 0..Self::ITERATIONS {
                let mut grad_w = scores.weights[k]
                    .iter()
                    .map(|w| penalty * w)
                    .collect::<Vec<_>>();
                let mut grad_b = 0.0;
                for (row, y) in rows.iter().zip(&targets) {
                    let decision = scores.bias[k]
                        + scores.weights[k]
                            .iter()
                            .zip(row)
                            .map(|(w, x)| w * x)
                            .sum::<f64>();
                    let margin = 1.0 - y * decision;
                    if margin > 0.0 {
                        let coef = -2.0 * y * margin / n;
                        grad_b += coef;
                        for (g, x) in grad_w.iter_mut().zip(row) {
                            *g += coef * x;
                        }
                    }
                }
                scores.bias[k] -= Self::LEARNING_RATE * grad_b;
                for (w, g) in scores.weights[k].iter_mut().zip(&grad_w) {
                    *w -= Self::LEARNING_RATE * g;
                }
            }
        }
        Self { scores }
    }

    fn predict(&self, features: &[f64]) -> Hazard {
        self.scores.predict(features)
    }
}
