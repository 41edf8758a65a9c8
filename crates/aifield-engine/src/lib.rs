pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Invalid construction parameters for a board or a simulation.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display("board size must be positive")]
    InvalidBoardSize,
    #[display("mine probability must lie strictly between 0 and 1, got {probability}")]
    InvalidMineProbability { probability: f64 },
    #[display("headcount must be positive")]
    InvalidHeadcount,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("feature pool for {hazard} holds {available} samples, but the board needs {required}")]
pub struct InsufficientFeaturePoolError {
    pub hazard: Hazard,
    pub required: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unsupported classifier: {name}")]
pub struct UnsupportedPredictorError {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("feature vector has width {actual}, expected {expected}")]
pub struct FeatureWidthMismatchError {
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum BoardError {
    #[display("{_0}")]
    Configuration(ConfigurationError),
    #[display("{_0}")]
    InsufficientFeaturePool(InsufficientFeaturePoolError),
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SimulationError {
    #[display("{_0}")]
    Configuration(ConfigurationError),
    #[display("{_0}")]
    InsufficientFeaturePool(InsufficientFeaturePoolError),
    #[display("{_0}")]
    UnsupportedPredictor(UnsupportedPredictorError),
    #[display("board features do not fit the classifier: {_0}")]
    FeatureWidthMismatch(FeatureWidthMismatchError),
}

impl From<BoardError> for SimulationError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Configuration(err) => Self::Configuration(err),
            BoardError::InsufficientFeaturePool(err) => Self::InsufficientFeaturePool(err),
        }
    }
}
