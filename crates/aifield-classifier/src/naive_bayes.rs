use std::f64::consts::TAU;

use aifield_engine::Hazard;

use crate::{Model, TrainingData, training::argmax};

/// Portion of the largest feature variance added to every variance.
const VAR_SMOOTHING: f64 = 1e-9;

#[derive(Debug, Clone)]
struct ClassDensity {
    log_prior: f64,
    mean: Vec<f64>,
    variance: Vec<f64>,
}

/// Gaussian naive Bayes with empirical class priors.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    /// `None` for classes absent from the training data.
    classes: [Option<ClassDensity>; Hazard::LEN],
}

#[expect(clippy::cast_precision_loss)]
fn mean_and_variance(rows: &[&[f64]], width: usize) -> (Vec<f64>, Vec<f64>) {
    let n = rows.len().max(1) as f64;
    let mean = (0..width)
        .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / n)
        .collect::<Vec<_>>();
    let variance = (0..width)
        .map(|j| rows.iter().map(|row| (row[j] - mean[j]).powi(2)).sum::<f64>() / n)
        .collect();
    (mean, variance)
}

impl Model for GaussianNaiveBayes {
    const NAME: &'static str = "GaussianNB";

    #[expect(clippy::cast_precision_loss)]
    fn fit(data: &TrainingData) -> Self {
        let all_rows = data.rows().iter().map(Vec::as_slice).collect::<Vec<_>>();
        let (_, total_variance) = mean_and_variance(&all_rows, data.width());
        let epsilon = VAR_SMOOTHING * total_variance.iter().copied().fold(0.0, f64::max);
        let counts = data.class_counts();

        let classes = Hazard::ALL.map(|hazard| {
            let count = counts[hazard.index()];
            if count == 0 {
                return None;
            }
            let rows = data
                .iter()
                .filter(|(_, label)| *label == hazard)
                .map(|(row, _)| row)
                .collect::<Vec<_>>();
            let (mean, mut variance) = mean_and_variance(&rows, data.width());
            for v in &mut variance {
                *v += epsilon;
            }
            Some(ClassDensity {
                log_prior: (count as f64 / data.len() as f64).ln(),
                mean,
                variance,
            })
        });
        Self { classes }
    }

    fn predict(&self, features: &[f64]) -> Hazard {
        let scores = self.classes.each_ref().map(|class| {
            class.as_ref().map_or(f64::NEG_INFINITY, |class| {
                class.log_prior
                    + features
                        .iter()
                        .zip(class.mean.iter().zip(&class.variance))
                        .map(|(x, (mean, variance))| {
                            -0.5 * (TAU * variance).ln() - (x - mean).powi(2) / (2.0 * variance)
                        })
                        .sum::<f64>()
            })
        });
        argmax(&scores)
    }
}
