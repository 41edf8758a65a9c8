use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, PathKind, SimulationSeed};

pub const DEFAULT_BOARD_SIZE: usize = 10;
pub const DEFAULT_MINE_PROBABILITY: f64 = 0.2;
pub const DEFAULT_CLASSIFIER: &str = "KNN";
pub const DEFAULT_HEADCOUNT: u32 = 100;

/// Construction parameters of a simulation run.
///
/// Missing fields take their defaults when deserialized, so a configuration
/// file only needs to name what it changes:
///
/// ```
/// use aifield_engine::{PathKind, SimulationConfig};
///
/// let config: SimulationConfig =
///     serde_json::from_str(r#"{ "size": 20, "path": "Diagonal" }"#).unwrap();
/// assert_eq!(config.size, 20);
/// assert_eq!(config.path, PathKind::Diagonal);
/// assert_eq!(config.headcount, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub size: usize,
    pub mine_probability: f64,
    pub classifier: String,
    pub path: PathKind,
    pub headcount: u32,
    /// Seed of the run's random source; a random seed is drawn when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<SimulationSeed>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            mine_probability: DEFAULT_MINE_PROBABILITY,
            classifier: DEFAULT_CLASSIFIER.to_owned(),
            path: PathKind::default(),
            headcount: DEFAULT_HEADCOUNT,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.size == 0 {
            return Err(ConfigurationError::InvalidBoardSize);
        }
        if !(self.mine_probability > 0.0 && self.mine_probability < 1.0) {
            return Err(ConfigurationError::InvalidMineProbability {
                probability: self.mine_probability,
            });
        }
        if self.headcount == 0 {
            return Err(ConfigurationError::InvalidHeadcount);
        }
        Ok(())
    }
}
