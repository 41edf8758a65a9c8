use aifield_engine::Hazard;
use rand::{Rng as _, SeedableRng as _, seq::index};
use rand_pcg::Pcg32;

use crate::{Model, TrainingData, training::argmax};

const FOREST_SIZE: usize = 100;
const FOREST_SEED: u64 = 42;

#[derive(Debug, Clone)]
enum Node {
    Leaf(Hazard),
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Restricts every split search to a random subset of the features.
#[derive(Debug)]
struct FeatureSampling<'a> {
    count: usize,
    rng: &'a mut Pcg32,
}

#[derive(Debug)]
struct Grower<'a> {
    data: &'a TrainingData,
    sampling: Option<FeatureSampling<'a>>,
    nodes: Vec<Node>,
}

fn class_counts(data: &TrainingData, samples: &[usize]) -> [usize; Hazard::LEN] {
    let mut counts = [0; Hazard::LEN];
    for &i in samples {
        counts[data.labels()[i].index()] += 1;
    }
    counts
}

#[expect(clippy::cast_precision_loss)]
fn weighted_gini(counts: &[usize; Hazard::LEN], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let sum_sq = counts.iter().map(|&c| (c as f64 / n).powi(2)).sum::<f64>();
    n * (1.0 - sum_sq)
}

#[expect(clippy::cast_precision_loss)]
fn majority(counts: &[usize; Hazard::LEN]) -> Hazard {
    argmax(&counts.map(|c| c as f64))
}

impl Grower<'_> {
    fn grow(&mut self, samples: &[usize]) -> usize {
        let counts = class_counts(self.data, samples);
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf(majority(&counts)));

        if counts.iter().filter(|&&c| c > 0).count() <= 1 {
            return index;
        }
        let Some(split) = self.best_split(samples, &counts) else {
            return index;
        };

        let rows = self.data.rows();
        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|&&i| rows[i][split.feature] <= split.threshold);
        let left = self.grow(&left);
        let right = self.grow(&right);
        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }

    fn best_split(&mut self, samples: &[usize], counts: &[usize; Hazard::LEN]) -> Option<Split> {
        let width = self.data.width();
        let candidates = match &mut self.sampling {
            Some(sampling) if sampling.count < width => {
                index::sample(&mut *sampling.rng, width, sampling.count).into_vec()
            }
            _ => (0..width).collect(),
        };
        let best = self.search(samples, counts, &candidates);
        if best.is_some() || candidates.len() == width {
            return best;
        }
        // the sampled features were all constant on this node
        self.search(samples, counts, &(0..width).collect::<Vec<_>>())
    }

    fn search(
        &self,
        samples: &[usize],
        counts: &[usize; Hazard::LEN],
        features: &[usize],
    ) -> Option<Split> {
        let rows = self.data.rows();
        let labels = self.data.labels();
        let mut best: Option<Split> = None;

        for &feature in features {
            let mut sorted = samples.to_vec();
            sorted.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));

            let mut left = [0; Hazard::LEN];
            let mut right = *counts;
            for (pos, pair) in sorted.windows(2).enumerate() {
                let label = labels[pair[0]].index();
                left[label] += 1;
                right[label] -= 1;

                let lo = rows[pair[0]][feature];
                let hi = rows[pair[1]][feature];
                if lo >= hi {
                    continue;
                }
                let impurity =
                    weighted_gini(&left, pos + 1) + weighted_gini(&right, sorted.len() - pos - 1);
                if best.is_none_or(|best| impurity < best.impurity) {
                    let mut threshold = f64::midpoint(lo, hi);
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some(Split {
                        feature,
                        threshold,
                        impurity,
                    });
                }
            }
        }
        best
    }
}

/// Unpruned CART tree splitting on Gini impurity.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn grow(data: &TrainingData, samples: &[usize], sampling: Option<FeatureSampling<'_>>) -> Self {
        let mut grower = Grower {
            data,
            sampling,
            nodes: vec![],
        };
        grower.grow(samples);
        Self {
            nodes: grower.nodes,
        }
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf(_)))
            .count()
    }
}

impl Model for DecisionTree {
    const NAME: &'static str = "DecisionTree";

    fn fit(data: &TrainingData) -> Self {
        let samples = (0..data.len()).collect::<Vec<_>>();
        Self::grow(data, &samples, None)
    }

    fn predict(&self, features: &[f64]) -> Hazard {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf(hazard) => return *hazard,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Bagged decision trees voting by majority.
///
/// Each tree is grown on a bootstrap sample and considers `sqrt(width)`
/// features per split. The generator is reseeded on every fit.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    #[must_use]
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl Model for RandomForest {
    const NAME: &'static str = "RandomForest";

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn fit(data: &TrainingData) -> Self {
        let mut rng = Pcg32::seed_from_u64(FOREST_SEED);
        let count = ((data.width() as f64).sqrt() as usize).max(1);
        let n = data.len();

        let mut trees = Vec::with_capacity(FOREST_SIZE);
        if n > 0 {
            for _ in 0..FOREST_SIZE {
                let samples = (0..n).map(|_| rng.random_range(0..n)).collect::<Vec<_>>();
                let sampling = FeatureSampling {
                    count,
                    rng: &mut rng,
                };
                trees.push(DecisionTree::grow(data, &samples, Some(sampling)));
            }
        }
        Self { trees }
    }

    fn predict(&self, features: &[f64]) -> Hazard {
        let mut votes = [0.0; Hazard::LEN];
        for tree in &self.trees {
            votes[tree.predict(features).index()] += 1.0;
        }
        argmax(&votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{iris_data, training_accuracy};

    #[test]
    fn test_tree_training_accuracy() {
        assert!(training_accuracy::<DecisionTree>() >= 0.99);
    }

    #[test]
    fn test_forest_training_accuracy() {
        assert!(training_accuracy::<RandomForest>() >= 0.97);
    }

    #[test]
    fn test_first_split_isolates_setosa() {
        let tree = DecisionTree::fit(&iris_data());
        assert!(tree.leaf_count() > 2);
        assert_eq!(tree.predict(&[5.0, 3.4, 1.5, 0.2]), Hazard::Empty);
        assert_eq!(tree.predict(&[5.0, 3.4, 1.0, 0.2]), Hazard::Empty);
    }

    #[test]
    fn test_pure_data_is_single_leaf() {
        let data = TrainingData::from(
            &aifield_dataset::Dataset::new(
                vec!["x".into()],
                vec![
                    aifield_dataset::LabeledSample {
                        features: vec![1.0],
                        hazard: Hazard::Bomb,
                    },
                    aifield_dataset::LabeledSample {
                        features: vec![2.0],
                        hazard: Hazard::Bomb,
                    },
                ],
            )
            .unwrap(),
        );
        let tree = DecisionTree::fit(&data);
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.predict(&[10.0]), Hazard::Bomb);
    }

    #[test]
    fn test_forest_is_reproducible() {
        let data = iris_data();
        let a = RandomForest::fit(&data);
        let b = RandomForest::fit(&data);
        assert_eq!(a.trees().len(), FOREST_SIZE);
        for (x, y) in a.trees().iter().zip(b.trees()) {
            assert_eq!(x.leaf_count(), y.leaf_count());
        }
        for (row, _) in data.iter() {
            assert_eq!(a.predict(row), b.predict(row));
        }
    }
}
