use std::path::PathBuf;

use aifield_classifier::ClassifierRegistry;
use aifield_dataset::{Dataset, HeldOutFeaturePool, PoolOptions, iris};
use aifield_engine::{PathKind, Simulation, SimulationConfig, SimulationSeed};
use anyhow::Context as _;

use crate::util;

/// Simulation parameters shared by every simulating command.
///
/// Flags override the values read from `--config`.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulationArg {
    /// JSON file with a simulation configuration
    #[clap(long)]
    config: Option<PathBuf>,
    /// Board side length
    #[clap(long)]
    size: Option<usize>,
    /// Probability that a cell holds a mine or a bomb
    #[clap(long)]
    mine_probability: Option<f64>,
    /// Classifier identifier (KNN, GaussianNB, DecisionTree, RandomForest, ...)
    #[clap(long)]
    classifier: Option<String>,
    /// Traversal path (Horizontal or Diagonal)
    #[clap(long)]
    path: Option<PathKind>,
    /// Initial squad size
    #[clap(long)]
    headcount: Option<u32>,
    /// 32-digit hex seed of the run
    #[clap(long)]
    seed: Option<SimulationSeed>,
    /// Dataset JSON file the board features are drawn from
    #[clap(long)]
    dataset: Option<PathBuf>,
}

impl SimulationArg {
    pub(crate) fn config(&self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("simulation config", path)?,
            None => SimulationConfig::default(),
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(mine_probability) = self.mine_probability {
            config.mine_probability = mine_probability;
        }
        if let Some(classifier) = &self.classifier {
            config.classifier.clone_from(classifier);
        }
        if let Some(path) = self.path {
            config.path = path;
        }
        if let Some(headcount) = self.headcount {
            config.headcount = headcount;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config
            .validate()
            .context("Invalid simulation configuration")?;
        Ok(config)
    }

    pub(crate) fn feature_pool(&self) -> anyhow::Result<HeldOutFeaturePool> {
        let options = PoolOptions::default();
        let pool = match &self.dataset {
            Some(path) => {
                let dataset: Dataset = util::read_json_file("dataset", path)?;
                HeldOutFeaturePool::from_dataset(&dataset, options.test_fraction, options.seed)
                    .with_context(|| format!("Failed to split dataset: {}", path.display()))?
            }
            None => HeldOutFeaturePool::build(&iris(), &options)
                .context("Failed to build the feature pool")?,
        };
        Ok(pool)
    }
}

/// Everything needed to start simulations from one set of arguments.
#[derive(Debug)]
pub(crate) struct SimulationSetup {
    pub(crate) config: SimulationConfig,
    pub(crate) pool: HeldOutFeaturePool,
    pub(crate) registry: ClassifierRegistry,
}

impl SimulationSetup {
    pub(crate) fn from_arg(arg: &SimulationArg) -> anyhow::Result<Self> {
        let config = arg.config()?;
        let pool = arg.feature_pool()?;
        tracing::info!(
            size = config.size,
            classifier = %config.classifier,
            path = %config.path,
            pool = pool.pool().total_len(),
            "simulation setup ready"
        );
        Ok(Self {
            config,
            pool,
            registry: ClassifierRegistry::iris(),
        })
    }

    pub(crate) fn simulation(&self, config: &SimulationConfig) -> anyhow::Result<Simulation> {
        Simulation::new(config, &self.pool, &self.registry)
            .context("Failed to start the simulation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let arg = SimulationArg {
            size: Some(5),
            path: Some(PathKind::Diagonal),
            classifier: Some("GaussianNB".to_owned()),
            ..SimulationArg::default()
        };
        let config = arg.config().unwrap();
        assert_eq!(config.size, 5);
        assert_eq!(config.path, PathKind::Diagonal);
        assert_eq!(config.classifier, "GaussianNB");
        assert_eq!(config.headcount, 100);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        let arg = SimulationArg {
            mine_probability: Some(1.0),
            ..SimulationArg::default()
        };
        assert!(arg.config().is_err());
    }

    #[test]
    fn test_setup_runs_a_small_simulation() {
        let arg = SimulationArg {
            size: Some(4),
            seed: Some(SimulationSeed::from_u128(7)),
            ..SimulationArg::default()
        };
        let setup = SimulationSetup::from_arg(&arg).unwrap();
        let mut simulation = setup.simulation(&setup.config).unwrap();
        let accuracy = simulation.run_to_end();
        assert!((0.0..=1.0).contains(&accuracy));
        assert_eq!(simulation.stats().visited(), 16);
    }
}
