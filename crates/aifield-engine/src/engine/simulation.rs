use std::iter::FusedIterator;

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    Board, BoxedHazardPredictor, ConfigurationError, Coordinate, FeaturePoolProvider,
    FeatureWidthMismatchError, Hazard, HazardPredictor, PathCursor, PathKind, PredictorFactory, RandomEvent, SimulationConfig, SimulationError,
    SimulationEvent, SimulationSeed, SimulationStats, Soldier as _, Specialist, Troops,
};

/// Headcount from which unprotected bomb blasts kill a larger squad share.
const LARGE_SQUAD_HEADCOUNT: u32 = 500;

/// How a visited cell was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellOutcome {
    /// Correctly predicted empty cell.
    Cleared,
    /// Correctly predicted mine or bomb, disarmed by the squad.
    Disarmed,
    /// Mispredicted empty cell.
    LuckyMiss,
    /// A Heavy absorbed the blast and returned to the pool.
    HeavyShielded,
    /// A Heavy died absorbing the blast.
    HeavyLost,
    /// A Sapper disarmed the hazard and returned to the pool.
    SapperDisarmed,
    /// A Sapper died attempting to disarm.
    SapperLost,
    /// No specialist was available; the squad took casualties.
    Casualties { casualties: u32 },
}

impl CellOutcome {
    /// Whether the cell's hazard was neutralized.
    #[must_use]
    pub const fn is_neutralized(self) -> bool {
        matches!(self, Self::Disarmed | Self::SapperDisarmed)
    }
}

/// Everything that happened at one visited cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub coordinate: Coordinate,
    pub predicted: Hazard,
    pub actual: Hazard,
    pub outcome: CellOutcome,
    pub random_event: RandomEvent,
}

/// A squad crossing a minefield, one cell at a time.
///
/// The simulation is a pull-based cursor: each call to
/// [`Simulation::advance_one`] resolves exactly one cell along the path and
/// returns its coordinate. Counters and the event log stay inspectable between
/// steps. Once the path is exhausted, [`Simulation::accuracy`] is available.
///
/// All randomness of a run (board, specialist order, casualties, random
/// events) comes from one generator seeded with [`Simulation::seed`].
#[derive(Debug)]
pub struct Simulation {
    board: Board,
    troops: Troops,
    predictor: BoxedHazardPredictor,
    rng: Pcg32,
    seed: SimulationSeed,
    cursor: PathCursor,
    stats: SimulationStats,
    event_log: Vec<SimulationEvent>,
    last_step: Option<Step>,
    accuracy: Option<f64>,
}

impl Simulation {
    /// Builds a simulation, resolving the classifier through `factory`.
    pub fn new(
        config: &SimulationConfig,
        pool_provider: &dyn FeaturePoolProvider,
        factory: &dyn PredictorFactory,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let predictor = factory.create(&config.classifier)?;
        Self::with_predictor(config, pool_provider, predictor)
    }

    /// Builds a simulation around an already constructed predictor.
    ///
    /// `config.classifier` is ignored. Fails if the pool's vectors are not as
    /// wide as the predictor's training data.
    pub fn with_predictor(
        config: &SimulationConfig,
        pool_provider: &dyn FeaturePoolProvider,
        predictor: BoxedHazardPredictor,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Pcg32::from_seed(seed.to_bytes());
        let pool = pool_provider.feature_pool();
        check_width(predictor.as_ref(), pool.width())?;
        let board = Board::new(config.size, config.mine_probability, &pool, &mut rng)?;
        Ok(Self::from_parts(
            board,
            config.path,
            config.headcount,
            predictor,
            seed,
            rng,
        ))
    }

    /// Builds a simulation over a prepared board.
    pub fn with_board(
        board: Board,
        path: PathKind,
        headcount: u32,
        predictor: BoxedHazardPredictor,
        seed: SimulationSeed,
    ) -> Result<Self, SimulationError> {
        if headcount == 0 {
            return Err(ConfigurationError::InvalidHeadcount.into());
        }
        check_width(predictor.as_ref(), board.feature_width())?;
        let rng = Pcg32::from_seed(seed.to_bytes());
        Ok(Self::from_parts(board, path, headcount, predictor, seed, rng))
    }

    fn from_parts(
        board: Board,
        path: PathKind,
        headcount: u32,
        predictor: BoxedHazardPredictor,
        seed: SimulationSeed,
        mut rng: Pcg32,
    ) -> Self {
        let troops = Troops::create(headcount, &mut rng);
        let cursor = PathCursor::new(path, board.size());
        tracing::info!(
            %seed,
            size = board.size(),
            mine_probability = board.mine_probability(),
            mines = board.amount_of_mines(),
            bombs = board.amount_of_bombs(),
            classifier = predictor.name(),
            %path,
            headcount,
            heavy = troops.heavy_count(),
            sappers = troops.sapper_count(),
            "simulation created"
        );
        Self {
            board,
            troops,
            predictor,
            rng,
            seed,
            cursor,
            stats: SimulationStats::new(headcount),
            event_log: vec![],
            last_step: None,
            accuracy: None,
        }
    }

    /// Replaces the specialist pool.
    #[must_use]
    pub fn with_troops(mut self, troops: Troops) -> Self {
        self.troops = troops;
        self
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn troops(&self) -> &Troops {
        &self.troops
    }

    #[must_use]
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    #[must_use]
    pub fn event_log(&self) -> &[SimulationEvent] {
        &self.event_log
    }

    #[must_use]
    pub fn seed(&self) -> SimulationSeed {
        self.seed
    }

    #[must_use]
    pub fn path(&self) -> PathKind {
        self.cursor.kind()
    }

    #[must_use]
    pub fn classifier_name(&self) -> &str {
        self.predictor.name()
    }

    /// The most recently resolved cell.
    #[must_use]
    pub fn last_step(&self) -> Option<&Step> {
        self.last_step.as_ref()
    }

    /// Number of cells the path visits in total.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cursor.total()
    }

    /// Share of correct predictions over all path cells, once the path is exhausted.
    ///
    /// The denominator is `N²` for [`PathKind::Horizontal`] and `N` for
    /// [`PathKind::Diagonal`].
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.accuracy.is_some()
    }

    /// Resolves the next cell of the path and returns its coordinate.
    ///
    /// Returns `None` once every path cell has been visited.
    pub fn advance_one(&mut self) -> Option<Coordinate> {
        let coordinate = self.cursor.advance()?;
        self.event_log.push(SimulationEvent::Moving { coordinate });

        self.predictor.train();
        let predicted = self.predictor.predict(self.board.features_at(coordinate));
        let actual = self.board.hazard_at(coordinate);
        let outcome = self.resolve_cell(coordinate, predicted, actual);
        tracing::debug!(%coordinate, %predicted, %actual, ?outcome, "cell resolved");

        let random_event = self.rng.random();
        self.apply_random_event(random_event);
        self.stats.record_visit();

        self.last_step = Some(Step {
            coordinate,
            predicted,
            actual,
            outcome,
            random_event,
        });
        if !self.cursor.has_next() {
            self.finish();
        }
        Some(coordinate)
    }

    /// Runs the remaining path to completion and returns the final accuracy.
    pub fn run_to_end(&mut self) -> f64 {
        while self.advance_one().is_some() {}
        self.accuracy.unwrap_or_default()
    }

    fn log(&mut self, event: SimulationEvent) {
        self.event_log.push(event);
    }

    fn resolve_cell(
        &mut self,
        coordinate: Coordinate,
        predicted: Hazard,
        actual: Hazard,
    ) -> CellOutcome {
        if predicted == actual {
            self.stats.record_good_prediction();
            self.stats.record_disarm(actual, coordinate);
            let (event, outcome) = match actual {
                Hazard::Empty => (SimulationEvent::ClearedEmpty, CellOutcome::Cleared),
                Hazard::Mine => (SimulationEvent::PredictedMine, CellOutcome::Disarmed),
                Hazard::Bomb => (SimulationEvent::PredictedBomb, CellOutcome::Disarmed),
            };
            self.log(event);
            return outcome;
        }

        if actual == Hazard::Empty {
            self.log(SimulationEvent::LuckyMiss);
            return CellOutcome::LuckyMiss;
        }

        if let Some(specialist) = self.troops.pop() {
            self.log(SimulationEvent::SpecialForces);
            return self.dispatch(specialist, actual, coordinate);
        }

        let casualties = if actual == Hazard::Mine {
            self.rng.random_range(1..=5)
        } else if self.stats.headcount() >= LARGE_SQUAD_HEADCOUNT {
            self.rng.random_range(25..=50)
        } else {
            self.rng.random_range(5..=15)
        };
        self.stats.lose_soldiers(casualties);
        let event = match (self.stats.survivors(), actual) {
            (0, _) => SimulationEvent::AllSoldiersDead,
            (_, Hazard::Mine) => SimulationEvent::MineCasualties { casualties },
            _ => SimulationEvent::BombCasualties { casualties },
        };
        self.log(event);
        CellOutcome::Casualties { casualties }
    }

    /// Sends a specialist onto a mispredicted hazard.
    ///
    /// A surviving specialist goes back to the pool. A dead Heavy costs one
    /// survivor; a dead Sapper does not.
    fn dispatch(
        &mut self,
        mut specialist: Specialist,
        hazard: Hazard,
        coordinate: Coordinate,
    ) -> CellOutcome {
        specialist.react_to(hazard);
        match specialist {
            Specialist::Heavy(heavy) if !heavy.is_depleted() => {
                self.log(SimulationEvent::HeavySaved {
                    health: heavy.health(),
                    armor: heavy.armor(),
                });
                self.troops.push(specialist);
                CellOutcome::HeavyShielded
            }
            Specialist::Heavy(_) => {
                self.log(SimulationEvent::HeavyDied);
                self.stats.lose_soldiers(1);
                CellOutcome::HeavyLost
            }
            Specialist::Sapper(sapper) if !sapper.is_depleted() => {
                self.troops.push(specialist);
                self.stats.record_disarm(hazard, coordinate);
                self.log(if hazard == Hazard::Mine {
                    SimulationEvent::SapperDisarmedMine
                } else {
                    SimulationEvent::SapperDisarmedBomb
                });
                CellOutcome::SapperDisarmed
            }
            Specialist::Sapper(_) => {
                self.log(SimulationEvent::SapperDied);
                CellOutcome::SapperLost
            }
        }
    }

    fn apply_random_event(&mut self, event: RandomEvent) {
        match event {
            RandomEvent::FoundKit => {
                if let Some(mut sapper) = self.troops.take_first_sapper() {
                    let kits = sapper.add_kit(&mut self.rng);
                    tracing::trace!(kits, total = sapper.disarming_kits(), "kit found");
                    self.troops.push(sapper.into());
                    self.stats.record_found_kit();
                    self.log(SimulationEvent::KitFound);
                } else {
                    self.log(SimulationEvent::KitWithoutSapper);
                }
            }
            RandomEvent::EnemyEncounter => {
                if let Some(mut heavy) = self.troops.take_first_heavy() {
                    heavy.react_to_enemy();
                    tracing::trace!(remaining = self.troops.len(), "heavy sacrificed");
                    self.log(SimulationEvent::HeavySacrificed);
                } else {
                    let casualties = self.rng.random_range(1..=5);
                    self.stats.lose_soldiers(casualties);
                    tracing::trace!(casualties, "enemy encounter");
                    self.log(SimulationEvent::EnemyCasualties { casualties });
                }
            }
            RandomEvent::Reinforcements => {
                let recruits = self.rng.random_range(1..=3);
                self.stats.gain_soldiers(recruits);
                tracing::trace!(recruits, "reinforcements");
                self.log(SimulationEvent::Reinforcements { recruits });
            }
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn finish(&mut self) {
        let accuracy = self.stats.good_predictions() as f64 / self.cursor.total() as f64;
        self.accuracy = Some(accuracy);
        tracing::info!(
            accuracy,
            survivors = self.stats.survivors(),
            disarmed_mines = self.stats.disarmed_mines(),
            disarmed_bombs = self.stats.disarmed_bombs(),
            found_kits = self.stats.found_kits(),
            specialists = self.troops.len(),
            "simulation finished"
        );
    }
}

fn check_width(
    predictor: &dyn HazardPredictor,
    actual: usize,
) -> Result<(), FeatureWidthMismatchError> {
    let expected = predictor.width();
    if actual == expected {
        Ok(())
    } else {
        Err(FeatureWidthMismatchError { expected, actual })
    }
}

impl Iterator for Simulation {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance_one()
    }
}

impl FusedIterator for Simulation {}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        FeaturePool, HazardGrid, HazardPredictor, Heavy, Sapper, UnsupportedPredictorError,
    };

    /// Test double whose answers are fixed in advance.
    #[derive(Debug)]
    enum Script {
        /// Reads the class tag stored in the first feature.
        Oracle,
        Always(Hazard),
    }

    #[derive(Debug)]
    struct ScriptedPredictor {
        script: Script,
        width: usize,
        trainings: Rc<Cell<usize>>,
    }

    impl HazardPredictor for ScriptedPredictor {
        fn name(&self) -> &str {
            "Scripted"
        }

        fn width(&self) -> usize {
            self.width
        }

        fn train(&mut self) {
            self.trainings.set(self.trainings.get() + 1);
        }

        fn predict(&self, features: &[f32]) -> Hazard {
            match self.script {
                Script::Oracle => Hazard::from_label(features[0] as u8).unwrap(),
                Script::Always(hazard) => hazard,
            }
        }
    }

    fn scripted(script: Script) -> BoxedHazardPredictor {
        Box::new(ScriptedPredictor {
            script,
            width: 2,
            trainings: Rc::default(),
        })
    }

    struct ScriptedFactory;

    impl PredictorFactory for ScriptedFactory {
        fn supported_names(&self) -> Vec<&'static str> {
            vec!["Oracle"]
        }

        fn create(&self, name: &str) -> Result<BoxedHazardPredictor, UnsupportedPredictorError> {
            match name {
                "Oracle" => Ok(scripted(Script::Oracle)),
                _ => Err(UnsupportedPredictorError {
                    name: name.to_owned(),
                }),
            }
        }
    }

    /// Pool whose vectors are `[class label, index]`.
    fn tagged_pool(per_class: usize) -> FeaturePool {
        let mut pool = FeaturePool::new(2);
        for hazard in Hazard::ALL {
            for i in 0..per_class {
                pool.push(hazard, vec![f32::from(hazard.label()), i as f32])
                    .unwrap();
            }
        }
        pool
    }

    fn config(size: usize, path: PathKind, seed: u128) -> SimulationConfig {
        SimulationConfig {
            size,
            mine_probability: 0.2,
            classifier: "Oracle".to_owned(),
            path,
            headcount: 100,
            seed: Some(SimulationSeed::from_u128(seed)),
        }
    }

    /// One-cell simulation with a fixed specialist pool.
    fn single_cell(
        hazard: Hazard,
        predicted: Hazard,
        headcount: u32,
        specialists: Vec<Specialist>,
    ) -> Simulation {
        let mut rng = Pcg32::seed_from_u64(0);
        let hazards = HazardGrid::from_rows([[hazard]]).unwrap();
        let board = Board::with_hazards(hazards, 0.5, &tagged_pool(1), &mut rng).unwrap();
        Simulation::with_board(
            board,
            PathKind::Horizontal,
            headcount,
            scripted(Script::Always(predicted)),
            SimulationSeed::from_u128(1),
        )
        .unwrap()
        .with_troops(Troops::from_specialists(specialists))
    }

    /// Survivor change caused by the random event logged last.
    fn random_survivor_delta(sim: &Simulation) -> i64 {
        match sim.event_log().last().unwrap() {
            SimulationEvent::Reinforcements { recruits } => i64::from(*recruits),
            SimulationEvent::EnemyCasualties { casualties } => -i64::from(*casualties),
            _ => 0,
        }
    }

    #[test]
    fn test_scenario_ten_by_ten_horizontal() {
        let pool = tagged_pool(100);
        let mut sim = Simulation::with_predictor(
            &config(10, PathKind::Horizontal, 7),
            &pool,
            scripted(Script::Always(Hazard::Empty)),
        )
        .unwrap();
        assert_eq!(sim.troops().heavy_count(), 3);
        assert_eq!(sim.troops().sapper_count(), 2);

        let coordinates = sim.by_ref().collect::<Vec<_>>();
        assert_eq!(coordinates.len(), 100);
        assert_eq!(
            coordinates,
            PathKind::Horizontal.coordinates(10).collect::<Vec<_>>()
        );
        assert!(!sim.event_log().is_empty());
        assert_eq!(sim.stats().visited(), 100);

        let empty = sim.board().amount_of_empty();
        assert_eq!(sim.stats().good_predictions(), empty);
        let expected = empty as f64 / 100.0;
        assert_eq!(sim.accuracy(), Some(expected));
        assert_eq!(sim.next(), None);
    }

    #[test]
    fn test_diagonal_accuracy_uses_side_length() {
        let pool = tagged_pool(100);
        let mut sim = Simulation::with_predictor(
            &config(8, PathKind::Diagonal, 3),
            &pool,
            scripted(Script::Always(Hazard::Empty)),
        )
        .unwrap();
        let coordinates = sim.by_ref().collect::<Vec<_>>();
        assert_eq!(coordinates.len(), 8);
        assert!(coordinates.iter().all(|c| c.x == c.y));

        let empty = coordinates
            .iter()
            .filter(|c| sim.board().hazard_at(**c) == Hazard::Empty)
            .count();
        let expected = empty as f64 / 8.0;
        assert_eq!(sim.accuracy(), Some(expected));
    }

    #[test]
    fn test_oracle_disarms_every_hazard() {
        let pool = tagged_pool(100);
        let factory = ScriptedFactory;
        let mut sim =
            Simulation::new(&config(10, PathKind::Horizontal, 11), &pool, &factory).unwrap();
        let accuracy = sim.run_to_end();

        assert!((accuracy - 1.0).abs() < f64::EPSILON);
        let board = sim.board();
        assert_eq!(sim.stats().disarmed_mines(), board.amount_of_mines());
        assert_eq!(sim.stats().disarmed_bombs(), board.amount_of_bombs());
        assert_eq!(
            sim.stats().disarmed_locations().len(),
            board.amount_of_mines() + board.amount_of_bombs()
        );
        assert!(
            sim.stats()
                .disarmed_locations()
                .iter()
                .all(|c| board.hazard_at(*c).is_explosive())
        );
    }

    #[test]
    fn test_counters_are_monotonic() {
        let pool = tagged_pool(100);
        let mut sim = Simulation::with_predictor(
            &config(10, PathKind::Horizontal, 5),
            &pool,
            scripted(Script::Always(Hazard::Mine)),
        )
        .unwrap();

        let mut previous = sim.stats().clone();
        while sim.advance_one().is_some() {
            let stats = sim.stats();
            assert!(stats.disarmed_mines() >= previous.disarmed_mines());
            assert!(stats.disarmed_bombs() >= previous.disarmed_bombs());
            assert!(stats.found_kits() >= previous.found_kits());
            assert!(stats.good_predictions() >= previous.good_predictions());
            assert_eq!(stats.visited(), previous.visited() + 1);
            previous = stats.clone();
        }
        let accuracy = sim.accuracy().unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
    }

    #[test]
    fn test_same_seed_replays_run() {
        let pool = tagged_pool(100);
        let run = || {
            let mut sim = Simulation::with_predictor(
                &config(10, PathKind::Horizontal, 99),
                &pool,
                scripted(Script::Always(Hazard::Empty)),
            )
            .unwrap();
            sim.run_to_end();
            sim
        };
        let a = run();
        let b = run();
        assert_eq!(a.event_log(), b.event_log());
        assert_eq!(a.stats(), b.stats());
        assert_eq!(a.troops(), b.troops());
    }

    #[test]
    fn test_retrains_before_every_prediction() {
        let trainings = Rc::new(Cell::new(0));
        let predictor = Box::new(ScriptedPredictor {
            script: Script::Oracle,
            width: 2,
            trainings: Rc::clone(&trainings),
        });
        let mut sim =
            Simulation::with_predictor(&config(4, PathKind::Diagonal, 1), &tagged_pool(16), predictor)
                .unwrap();
        sim.run_to_end();
        assert_eq!(trainings.get(), 4);
    }

    #[test]
    fn test_construction_errors() {
        let pool = tagged_pool(100);
        let factory = ScriptedFactory;

        let mut bad = config(10, PathKind::Horizontal, 0);
        bad.classifier = "GradientBoosting".to_owned();
        assert!(matches!(
            Simulation::new(&bad, &pool, &factory),
            Err(SimulationError::UnsupportedPredictor(_))
        ));

        let mut bad = config(10, PathKind::Horizontal, 0);
        bad.mine_probability = 1.0;
        assert!(matches!(
            Simulation::new(&bad, &pool, &factory),
            Err(SimulationError::Configuration(_))
        ));

        let small = tagged_pool(5);
        assert!(matches!(
            Simulation::new(&config(10, PathKind::Horizontal, 0), &small, &factory),
            Err(SimulationError::InsufficientFeaturePool(_))
        ));
    }

    #[test]
    fn test_rejects_features_narrower_than_training_data() {
        let wide = || -> BoxedHazardPredictor {
            Box::new(ScriptedPredictor {
                script: Script::Always(Hazard::Empty),
                width: 4,
                trainings: Rc::default(),
            })
        };
        let result =
            Simulation::with_predictor(&config(4, PathKind::Horizontal, 0), &tagged_pool(16), wide());
        assert_eq!(
            result.unwrap_err(),
            SimulationError::FeatureWidthMismatch(FeatureWidthMismatchError {
                expected: 4,
                actual: 2,
            })
        );

        let mut rng = Pcg32::seed_from_u64(0);
        let hazards = HazardGrid::from_rows([[Hazard::Empty]]).unwrap();
        let board = Board::with_hazards(hazards, 0.5, &tagged_pool(1), &mut rng).unwrap();
        let result = Simulation::with_board(
            board,
            PathKind::Horizontal,
            100,
            wide(),
            SimulationSeed::from_u128(1),
        );
        assert!(matches!(
            result,
            Err(SimulationError::FeatureWidthMismatch(_))
        ));
    }

    #[test]
    fn test_step_logs_moving_first() {
        let mut sim = single_cell(Hazard::Empty, Hazard::Empty, 100, vec![]);
        assert_eq!(sim.advance_one(), Some(Coordinate::new(0, 0)));
        assert_eq!(
            sim.event_log()[..2],
            [
                SimulationEvent::Moving {
                    coordinate: Coordinate::new(0, 0)
                },
                SimulationEvent::ClearedEmpty,
            ]
        );
        assert_eq!(sim.last_step().unwrap().outcome, CellOutcome::Cleared);
        assert!(sim.is_finished());
        assert!(!sim.has_next());
    }

    #[test]
    fn test_lucky_miss_changes_nothing() {
        let mut sim = single_cell(Hazard::Empty, Hazard::Bomb, 100, vec![Heavy::default().into()]);
        sim.advance_one();
        assert_eq!(sim.event_log()[1], SimulationEvent::LuckyMiss);
        assert_eq!(sim.stats().good_predictions(), 0);
        assert_eq!(sim.accuracy(), Some(0.0));
    }

    #[test]
    fn test_bad_prediction_pops_back_of_pool() {
        let mut sim = single_cell(
            Hazard::Mine,
            Hazard::Empty,
            100,
            vec![Heavy::default().into(), Sapper::default().into()],
        );
        sim.advance_one();
        assert_eq!(sim.event_log()[1], SimulationEvent::SpecialForces);
        assert_eq!(sim.event_log()[2], SimulationEvent::SapperDisarmedMine);
        assert_eq!(sim.stats().disarmed_mines(), 1);
        assert!(sim.stats().disarmed_locations().contains(&Coordinate::new(0, 0)));
        assert_eq!(sim.last_step().unwrap().outcome, CellOutcome::SapperDisarmed);
    }

    #[test]
    fn test_heavy_shields_mine() {
        let mut sim = single_cell(Hazard::Mine, Hazard::Empty, 100, vec![Heavy::default().into()]);
        sim.advance_one();
        assert_eq!(
            sim.event_log()[2],
            SimulationEvent::HeavySaved {
                health: 100,
                armor: 50
            }
        );
        assert_eq!(sim.stats().disarmed_mines(), 0);
        let expected = 100 + random_survivor_delta(&sim);
        assert_eq!(i64::from(sim.stats().survivors()), expected);
    }

    #[test]
    fn test_dead_heavy_costs_a_survivor() {
        let mut sim = single_cell(
            Hazard::Bomb,
            Hazard::Mine,
            100,
            vec![Heavy::with_armor(100, 0).into()],
        );
        sim.advance_one();
        assert_eq!(sim.event_log()[2], SimulationEvent::HeavyDied);
        assert_eq!(sim.troops().heavy_count(), 0);
        let expected = 99 + random_survivor_delta(&sim);
        assert_eq!(i64::from(sim.stats().survivors()), expected);
    }

    #[test]
    fn test_dead_sapper_keeps_survivor_count() {
        let mut sim = single_cell(Hazard::Bomb, Hazard::Empty, 100, vec![Sapper::default().into()]);
        sim.advance_one();
        assert_eq!(sim.event_log()[2], SimulationEvent::SapperDied);
        assert!(sim.troops().is_empty());
        assert_eq!(sim.stats().disarmed_bombs(), 0);
        let expected = 100 + random_survivor_delta(&sim);
        assert_eq!(i64::from(sim.stats().survivors()), expected);
    }

    #[test]
    fn test_sapper_with_two_kits_disarms_bomb() {
        let mut sim = single_cell(
            Hazard::Bomb,
            Hazard::Empty,
            100,
            vec![Sapper::new(100, 2).into()],
        );
        sim.advance_one();
        assert_eq!(sim.event_log()[2], SimulationEvent::SapperDisarmedBomb);
        assert_eq!(sim.last_step().unwrap().outcome, CellOutcome::SapperDisarmed);
        assert_eq!(sim.stats().disarmed_bombs(), 1);
        assert_eq!(sim.stats().disarmed_mines(), 0);
        assert!(sim.stats().disarmed_locations().contains(&Coordinate::new(0, 0)));

        assert_eq!(sim.troops().sapper_count(), 1);
        let Some(Specialist::Sapper(sapper)) = sim.troops().iter().next() else {
            panic!("sapper not returned to the pool: {:?}", sim.troops());
        };
        // the random event after the dispatch may hand it new kits
        let kits = if sim.stats().found_kits() == 0 { 0..=0 } else { 1..=2 };
        assert!(kits.contains(&sapper.disarming_kits()));
    }

    #[test]
    fn test_unprotected_mine_casualties() {
        let mut sim = single_cell(Hazard::Mine, Hazard::Empty, 100, vec![]);
        sim.advance_one();
        let SimulationEvent::MineCasualties { casualties } = sim.event_log()[1] else {
            panic!("unexpected event: {}", sim.event_log()[1]);
        };
        assert!((1..=5).contains(&casualties));
        let expected = 100 - i64::from(casualties) + random_survivor_delta(&sim);
        assert_eq!(i64::from(sim.stats().survivors()), expected);
    }

    #[test]
    fn test_unprotected_bomb_casualties_scale_with_headcount() {
        for (headcount, range) in [(100, 5..=15), (499, 5..=15), (500, 25..=50)] {
            for seed in 0..10 {
                let mut sim = single_cell(Hazard::Bomb, Hazard::Mine, headcount, vec![]);
                sim.rng = Pcg32::seed_from_u64(seed);
                sim.advance_one();
                let SimulationEvent::BombCasualties { casualties } = sim.event_log()[1] else {
                    panic!("unexpected event: {}", sim.event_log()[1]);
                };
                assert!(range.contains(&casualties), "{headcount}: {casualties}");
            }
        }
    }

    #[test]
    fn test_all_soldiers_dead_clamps_at_zero() {
        let mut sim = single_cell(Hazard::Bomb, Hazard::Empty, 1, vec![]);
        sim.advance_one();
        assert_eq!(sim.event_log()[1], SimulationEvent::AllSoldiersDead);
        let expected = random_survivor_delta(&sim).max(0);
        assert_eq!(i64::from(sim.stats().survivors()), expected);
    }

    #[test]
    fn test_found_kit_goes_to_first_sapper() {
        let mut sim = single_cell(
            Hazard::Empty,
            Hazard::Empty,
            100,
            vec![
                Sapper::new(100, 0).into(),
                Heavy::default().into(),
                Sapper::default().into(),
            ],
        );
        sim.apply_random_event(RandomEvent::FoundKit);
        assert_eq!(sim.stats().found_kits(), 1);
        assert_eq!(sim.event_log(), [SimulationEvent::KitFound]);

        let specialists = sim.troops().iter().copied().collect::<Vec<_>>();
        assert_eq!(specialists[0], Specialist::from(Heavy::default()));
        assert_eq!(specialists[1], Specialist::from(Sapper::default()));
        let Specialist::Sapper(sapper) = specialists[2] else {
            panic!("found-kit sapper must move to the back");
        };
        assert!((1..=2).contains(&sapper.disarming_kits()));
    }

    #[test]
    fn test_found_kit_without_sappers() {
        let mut sim = single_cell(Hazard::Empty, Hazard::Empty, 100, vec![Heavy::default().into()]);
        sim.apply_random_event(RandomEvent::FoundKit);
        assert_eq!(sim.stats().found_kits(), 0);
        assert_eq!(sim.event_log(), [SimulationEvent::KitWithoutSapper]);
        assert_eq!(sim.troops().len(), 1);
    }

    #[test]
    fn test_enemy_encounter_sacrifices_first_heavy() {
        let mut sim = single_cell(
            Hazard::Empty,
            Hazard::Empty,
            100,
            vec![
                Sapper::default().into(),
                Heavy::with_armor(100, 50).into(),
                Heavy::default().into(),
            ],
        );
        sim.apply_random_event(RandomEvent::EnemyEncounter);
        assert_eq!(sim.event_log(), [SimulationEvent::HeavySacrificed]);
        assert_eq!(sim.stats().survivors(), 100);
        assert_eq!(
            sim.troops().iter().copied().collect::<Vec<_>>(),
            [
                Specialist::from(Sapper::default()),
                Specialist::from(Heavy::default())
            ]
        );
    }

    #[test]
    fn test_enemy_encounter_without_heavy() {
        let mut sim = single_cell(Hazard::Empty, Hazard::Empty, 100, vec![Sapper::default().into()]);
        sim.apply_random_event(RandomEvent::EnemyEncounter);
        let SimulationEvent::EnemyCasualties { casualties } = sim.event_log()[0] else {
            panic!("unexpected event: {}", sim.event_log()[0]);
        };
        assert!((1..=5).contains(&casualties));
        assert_eq!(sim.stats().survivors(), 100 - casualties);
    }

    #[test]
    fn test_reinforcements_are_uncapped() {
        let mut sim = single_cell(Hazard::Empty, Hazard::Empty, 100, vec![]);
        for _ in 0..20 {
            sim.apply_random_event(RandomEvent::Reinforcements);
        }
        assert!((120..=160).contains(&sim.stats().survivors()));
    }
}
