use std::fmt;

use serde::Serialize;

use crate::{Coordinate, PathKind, Simulation, SimulationSeed};

/// Final report of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub classifier: String,
    pub path: PathKind,
    pub seed: SimulationSeed,
    pub size: usize,
    pub mine_probability: f64,
    pub headcount: u32,
    pub survivors: u32,
    pub visited: usize,
    pub good_predictions: usize,
    /// `None` while the path is not exhausted.
    pub accuracy: Option<f64>,
    pub amount_of_mines: usize,
    pub amount_of_bombs: usize,
    pub disarmed_mines: usize,
    pub disarmed_bombs: usize,
    pub found_kits: usize,
    pub remaining_specialists: usize,
    pub disarmed_locations: Vec<Coordinate>,
    pub event_log: Vec<String>,
}

impl Simulation {
    /// Snapshot of the counters accumulated so far.
    #[must_use]
    pub fn summary(&self) -> SimulationSummary {
        let board = self.board();
        let stats = self.stats();
        SimulationSummary {
            classifier: self.classifier_name().to_owned(),
            path: self.path(),
            seed: self.seed(),
            size: board.size(),
            mine_probability: board.mine_probability(),
            headcount: stats.headcount(),
            survivors: stats.survivors(),
            visited: stats.visited(),
            good_predictions: stats.good_predictions(),
            accuracy: self.accuracy(),
            amount_of_mines: board.amount_of_mines(),
            amount_of_bombs: board.amount_of_bombs(),
            disarmed_mines: stats.disarmed_mines(),
            disarmed_bombs: stats.disarmed_bombs(),
            found_kits: stats.found_kits(),
            remaining_specialists: self.troops().len(),
            disarmed_locations: stats.disarmed_locations().iter().copied().collect(),
            event_log: self.event_log().iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accuracy {
            Some(accuracy) => writeln!(
                f,
                "Classifier accuracy: {} is: {:.2}%",
                self.classifier,
                accuracy * 100.0
            )?,
            None => writeln!(
                f,
                "Classifier: {} ({} of {} cells visited)",
                self.classifier,
                self.visited,
                self.path.cell_count(self.size)
            )?,
        }
        writeln!(
            f,
            "All soldiers (special included): {} out of {}",
            self.survivors, self.headcount
        )?;
        writeln!(f, "Amount of Mines on board: {}.", self.amount_of_mines)?;
        writeln!(f, "Disarmed Mines: {}", self.disarmed_mines)?;
        writeln!(f, "Amount of Bombs on board: {}.", self.amount_of_bombs)?;
        writeln!(f, "Disarmed Bombs: {}", self.disarmed_bombs)?;
        writeln!(
            f,
            "The remaining Special force soldiers: {}",
            self.remaining_specialists
        )?;
        writeln!(f, "Found disarming kits : {}", self.found_kits)?;
        writeln!(f)?;
        writeln!(f, "Random Events Log:")?;
        for event in &self.event_log {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{Board, FeaturePool, Hazard, HazardGrid, HazardPredictor};

    #[derive(Debug)]
    struct AlwaysMine;

    impl HazardPredictor for AlwaysMine {
        fn name(&self) -> &str {
            "AlwaysMine"
        }

        fn width(&self) -> usize {
            1
        }

        fn train(&mut self) {}

        fn predict(&self, _features: &[f32]) -> Hazard {
            Hazard::Mine
        }
    }

    fn simulation() -> Simulation {
        let mut pool = FeaturePool::new(1);
        for hazard in Hazard::ALL {
            for _ in 0..4 {
                pool.push(hazard, vec![0.0]).unwrap();
            }
        }
        let hazards = HazardGrid::from_rows([
            [Hazard::Mine, Hazard::Empty],
            [Hazard::Bomb, Hazard::Mine],
        ])
        .unwrap();
        let board =
            Board::with_hazards(hazards, 0.3, &pool, &mut Pcg32::seed_from_u64(0)).unwrap();
        Simulation::with_board(
            board,
            PathKind::Horizontal,
            100,
            Box::new(AlwaysMine),
            SimulationSeed::from_u128(4),
        )
        .unwrap()
    }

    #[test]
    fn test_summary_reports_progress() {
        let mut sim = simulation();
        sim.advance_one();
        let summary = sim.summary();
        assert_eq!(summary.visited, 1);
        assert_eq!(summary.accuracy, None);
        assert_eq!(summary.disarmed_locations, [Coordinate::new(0, 0)]);
        assert!(
            summary
                .to_string()
                .starts_with("Classifier: AlwaysMine (1 of 4 cells visited)\n")
        );
    }

    #[test]
    fn test_summary_after_run() {
        let mut sim = simulation();
        sim.run_to_end();
        let summary = sim.summary();

        assert_eq!(summary.amount_of_mines, 2);
        assert_eq!(summary.amount_of_bombs, 1);
        assert_eq!(summary.good_predictions, 2);
        assert_eq!(summary.accuracy, Some(0.5));
        assert_eq!(summary.event_log.len(), sim.event_log().len());

        let text = summary.to_string();
        assert!(text.starts_with("Classifier accuracy: AlwaysMine is: 50.00%\n"));
        assert!(text.contains("Amount of Mines on board: 2.\n"));
        assert!(text.contains("\nRandom Events Log:\nMoving to [0][0]\n"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["path"], "Horizontal");
        assert_eq!(json["seed"], "00000000000000000000000000000004");
        assert_eq!(json["disarmed_locations"][0]["x"], 0);
    }
}
