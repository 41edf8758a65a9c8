use std::collections::BTreeSet;

use crate::{Coordinate, Hazard};

/// Running counters of a simulation.
///
/// Every counter except `survivors` only grows. Survivor losses clamp at
/// zero; reinforcements are uncapped.
///
/// # Example
///
/// ```
/// use aifield_engine::{Coordinate, Hazard, SimulationStats};
///
/// let mut stats = SimulationStats::new(10);
/// stats.record_disarm(Hazard::Mine, Coordinate::new(0, 1));
/// stats.lose_soldiers(25);
///
/// assert_eq!(stats.disarmed_mines(), 1);
/// assert_eq!(stats.survivors(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationStats {
    headcount: u32,
    survivors: u32,
    visited: usize,
    good_predictions: usize,
    disarmed_mines: usize,
    disarmed_bombs: usize,
    found_kits: usize,
    disarmed_locations: BTreeSet<Coordinate>,
}

impl SimulationStats {
    #[must_use]
    pub const fn new(headcount: u32) -> Self {
        Self {
            headcount,
            survivors: headcount,
            visited: 0,
            good_predictions: 0,
            disarmed_mines: 0,
            disarmed_bombs: 0,
            found_kits: 0,
            disarmed_locations: BTreeSet::new(),
        }
    }

    /// Soldiers deployed at the start of the run.
    #[must_use]
    pub const fn headcount(&self) -> u32 {
        self.headcount
    }

    #[must_use]
    pub const fn survivors(&self) -> u32 {
        self.survivors
    }

    /// Number of cells resolved so far.
    #[must_use]
    pub const fn visited(&self) -> usize {
        self.visited
    }

    #[must_use]
    pub const fn good_predictions(&self) -> usize {
        self.good_predictions
    }

    #[must_use]
    pub const fn disarmed_mines(&self) -> usize {
        self.disarmed_mines
    }

    #[must_use]
    pub const fn disarmed_bombs(&self) -> usize {
        self.disarmed_bombs
    }

    #[must_use]
    pub const fn found_kits(&self) -> usize {
        self.found_kits
    }

    /// Cells where a mine or bomb was neutralized.
    #[must_use]
    pub const fn disarmed_locations(&self) -> &BTreeSet<Coordinate> {
        &self.disarmed_locations
    }

    pub const fn record_visit(&mut self) {
        self.visited += 1;
    }

    pub const fn record_good_prediction(&mut self) {
        self.good_predictions += 1;
    }

    /// Counts a neutralized hazard at `coordinate`. Empty cells are ignored.
    pub fn record_disarm(&mut self, hazard: Hazard, coordinate: Coordinate) {
        match hazard {
            Hazard::Empty => return,
            Hazard::Mine => self.disarmed_mines += 1,
            Hazard::Bomb => self.disarmed_bombs += 1,
        }
        self.disarmed_locations.insert(coordinate);
    }

    pub const fn record_found_kit(&mut self) {
        self.found_kits += 1;
    }

    pub const fn lose_soldiers(&mut self, casualties: u32) {
        self.survivors = self.survivors.saturating_sub(casualties);
    }

    pub const fn gain_soldiers(&mut self, recruits: u32) {
        self.survivors = self.survivors.saturating_add(recruits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survivors_clamp_at_zero() {
        let mut stats = SimulationStats::new(3);
        stats.lose_soldiers(2);
        assert_eq!(stats.survivors(), 1);
        stats.lose_soldiers(5);
        assert_eq!(stats.survivors(), 0);
        stats.gain_soldiers(3);
        assert_eq!(stats.survivors(), 3);
        assert_eq!(stats.headcount(), 3);
    }

    #[test]
    fn test_record_disarm_tracks_locations() {
        let mut stats = SimulationStats::new(100);
        stats.record_disarm(Hazard::Empty, Coordinate::new(0, 0));
        stats.record_disarm(Hazard::Bomb, Coordinate::new(1, 1));
        stats.record_disarm(Hazard::Mine, Coordinate::new(2, 0));

        assert_eq!(stats.disarmed_mines(), 1);
        assert_eq!(stats.disarmed_bombs(), 1);
        assert_eq!(
            stats.disarmed_locations().iter().copied().collect::<Vec<_>>(),
            [Coordinate::new(1, 1), Coordinate::new(2, 0)]
        );
    }
}
