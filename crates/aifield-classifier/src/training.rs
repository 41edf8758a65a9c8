use aifield_dataset::Dataset;
use aifield_engine::Hazard;

/// Training rows converted to `f64`, with their labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingData {
    width: usize,
    rows: Vec<Vec<f64>>,
    labels: Vec<Hazard>,
}

impl From<&Dataset> for TrainingData {
    fn from(dataset: &Dataset) -> Self {
        let (rows, labels) = dataset
            .samples()
            .iter()
            .map(|sample| {
                let row = sample.features.iter().copied().map(f64::from).collect::<Vec<_>>();
                (row, sample.hazard)
            })
            .unzip();
        Self {
            width: dataset.width(),
            rows,
            labels,
        }
    }
}

impl TrainingData {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub fn labels(&self) -> &[Hazard] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f64], Hazard)> + '_ {
        self.rows
            .iter()
            .map(Vec::as_slice)
            .zip(self.labels.iter().copied())
    }

    /// Number of rows per class, indexed by [`Hazard::index`].
    #[must_use]
    pub fn class_counts(&self) -> [usize; Hazard::LEN] {
        let mut counts = [0; Hazard::LEN];
        for label in &self.labels {
            counts[label.index()] += 1;
        }
        counts
    }
}

/// The class with the highest score; the lowest label wins ties.
pub(crate) fn argmax(scores: &[f64; Hazard::LEN]) -> Hazard {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[best] {
            best = i;
        }
    }
    Hazard::ALL[best]
}

/// Per-feature z-score scaling fitted on training rows.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Standardizer {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl Standardizer {
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn fit(data: &TrainingData) -> Self {
        let n = data.len().max(1) as f64;
        let mean = (0..data.width())
            .map(|j| data.rows().iter().map(|row| row[j]).sum::<f64>() / n)
            .collect::<Vec<_>>();
        let scale = (0..data.width())
            .map(|j| {
                let variance = data
                    .rows()
                    .iter()
                    .map(|row| (row[j] - mean[j]).powi(2))
                    .sum::<f64>()
                    / n;
                // constant features pass through unscaled
                if variance > 0.0 { variance.sqrt() } else { 1.0 }
            })
            .collect();
        Self { mean, scale }
    }

    pub(crate) fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use aifield_dataset::iris;

    use super::*;

    #[test]
    fn test_from_dataset() {
        let data = TrainingData::from(&iris());
        assert_eq!(data.len(), 150);
        assert_eq!(data.width(), 4);
        assert_eq!(data.class_counts(), [50, 50, 50]);
        let (row, label) = data.iter().next().unwrap();
        assert_eq!(label, Hazard::Empty);
        assert!((row[0] - 5.1).abs() < 1e-6);
    }

    #[test]
    fn test_argmax_prefers_lowest_label_on_ties() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), Hazard::Mine);
        assert_eq!(argmax(&[0.0, 0.0, 0.0]), Hazard::Empty);
        assert_eq!(argmax(&[-5.0, -6.0, -1.0]), Hazard::Bomb);
    }

    #[test]
    fn test_standardizer_centers_features() {
        let data = TrainingData::from(&iris());
        let standardizer = Standardizer::fit(&data);
        let scaled = data
            .rows()
            .iter()
            .map(|row| standardizer.transform(row))
            .collect::<Vec<_>>();
        for j in 0..4 {
            let mean = scaled.iter().map(|row| row[j]).sum::<f64>() / 150.0;
            let variance = scaled.iter().map(|row| row[j].powi(2)).sum::<f64>() / 150.0;
            assert!(mean.abs() < 1e-9);
            assert!((variance - 1.0).abs() < 1e-9);
        }
    }
}
