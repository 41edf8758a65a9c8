//! Simulation logic driving a squad across a board.
//!
//! - [`Simulation`] - Pull-based cursor resolving one cell per step
//! - [`SimulationConfig`] - Construction parameters (size, probability, classifier, path, headcount)
//! - [`SimulationStats`] - Survivors, predictions, disarms and found kits
//! - [`SimulationSummary`] - Final report, printable and serializable
//! - [`PathKind`] - Horizontal (boustrophedon) or diagonal traversal
//! - [`HazardPredictor`] - The classifier seam, retrained before every prediction
//! - [`SimulationSeed`] - Seed for deterministic runs
//!
//! # Cell Resolution
//!
//! For every visited cell the predictor is retrained, asked for the cell's
//! hazard, and the prediction is compared with the truth:
//!
//! 1. A correct prediction counts as good; a correct mine or bomb is disarmed
//! 2. A mispredicted empty cell is a lucky miss
//! 3. A mispredicted mine or bomb is handled by the specialist at the back of
//!    the pool, or costs the squad casualties when the pool is empty
//!
//! A random event (found kit, enemy encounter, reinforcements) follows every
//! cell independently of the outcome.
//!
//! # Example
//!
//! ```
//! use aifield_engine::{
//!     FeaturePool, Hazard, HazardPredictor, PathKind, Simulation, SimulationConfig,
//!     SimulationSeed,
//! };
//!
//! #[derive(Debug)]
//! struct AlwaysEmpty;
//!
//! impl HazardPredictor for AlwaysEmpty {
//!     fn name(&self) -> &str {
//!         "AlwaysEmpty"
//!     }
//!     fn width(&self) -> usize {
//!         1
//!     }
//!     fn train(&mut self) {}
//!     fn predict(&self, _features: &[f32]) -> Hazard {
//!         Hazard::Empty
//!     }
//! }
//!
//! let mut pool = FeaturePool::new(1);
//! for hazard in Hazard::ALL {
//!     for _ in 0..25 {
//!         pool.push(hazard, vec![0.0]).unwrap();
//!     }
//! }
//!
//! let config = SimulationConfig {
//!     size: 5,
//!     path: PathKind::Diagonal,
//!     seed: Some(SimulationSeed::from_u128(1)),
//!     ..SimulationConfig::default()
//! };
//! let mut sim = Simulation::with_predictor(&config, &pool, Box::new(AlwaysEmpty)).unwrap();
//!
//! while let Some(coordinate) = sim.advance_one() {
//!     println!("visited {coordinate}");
//! }
//! assert_eq!(sim.stats().visited(), 5);
//! assert!(sim.accuracy().is_some());
//! ```

pub use self::{
    config::*, event::*, path::*, predictor::*, seed::*, simulation::*, simulation_stats::*,
    summary::*,
};

mod config;
mod event;
mod path;
mod predictor;
mod seed;
mod simulation;
mod simulation_stats;
mod summary;
