use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use crate::Coordinate;

/// An entry of the simulation's human-readable event log.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SimulationEvent {
    #[display("Moving to {coordinate}")]
    Moving { coordinate: Coordinate },

    // cell resolution
    #[display("Good prediction, there is no mine nor bomb.")]
    ClearedEmpty,
    #[display("Disarmed mine, because of good prediction!")]
    PredictedMine,
    #[display("Disarmed bomb, because of good prediction. WE'RE LUCKY SIR!")]
    PredictedBomb,
    #[display("BAD PREDICTION, but there is no mine nor bomb, WE ARE REALLY LUCKY!")]
    LuckyMiss,
    #[display("Bad prediction, but here are our SPECIAL FORCES SIR!")]
    SpecialForces,
    #[display("Bad prediction (MINE) and there are no special forces available. Lost casualties: {casualties}")]
    MineCasualties { casualties: u32 },
    #[display("Bad prediction (BOMB) and there are no special forces available. Lost casualties: {casualties}")]
    BombCasualties { casualties: u32 },
    #[display("Bad prediction and ALL SOLDIERS ARE DEAD")]
    AllSoldiersDead,

    // specialist dispatch
    #[display("Heavy saves us, HeavyStats: Health: {health}, Armor: {armor}")]
    HeavySaved { health: u32, armor: u32 },
    #[display("Heavy sacrificed himself and DIED.")]
    HeavyDied,
    #[display("Sapper disarmed MINE!")]
    SapperDisarmedMine,
    #[display("Sapper disarmed BOMB!")]
    SapperDisarmedBomb,
    #[display("Sapper died during disarming...")]
    SapperDied,

    // random events
    #[display("RANDOM EVENT - Found disarming kit, adding it to SAPPER inventory.")]
    KitFound,
    #[display("RANDOM EVENT - Found disarming kit, BUT THERE AREN'T ANY SAPPERS")]
    KitWithoutSapper,
    #[display("Enemy unit encountered, HEAVY DIED SAVING US!")]
    HeavySacrificed,
    #[display("Enemy unit encountered -> Lost: {casualties} casualties")]
    EnemyCasualties { casualties: u32 },
    #[display("Recruited new soldiers: Gained: {recruits} soldiers.")]
    Reinforcements { recruits: u32 },
}

/// The random event rolled after every visited cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RandomEvent {
    /// A Sapper gains one or two disarming kits.
    FoundKit,
    /// A Heavy dies covering the squad, or the squad takes casualties.
    EnemyEncounter,
    /// Survivors grow by one to three soldiers.
    Reinforcements,
}

/// Allows rolling the three outcomes with equal probability via `rng.random()`.
impl Distribution<RandomEvent> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RandomEvent {
        match rng.random_range(0..3) {
            0 => RandomEvent::FoundKit,
            1 => RandomEvent::EnemyEncounter,
            _ => RandomEvent::Reinforcements,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_event_messages() {
        let event = SimulationEvent::Moving {
            coordinate: Coordinate::new(2, 7),
        };
        assert_eq!(event.to_string(), "Moving to [2][7]");
        assert_eq!(
            SimulationEvent::HeavySaved {
                health: 100,
                armor: 50
            }
            .to_string(),
            "Heavy saves us, HeavyStats: Health: 100, Armor: 50"
        );
        assert_eq!(
            SimulationEvent::EnemyCasualties { casualties: 3 }.to_string(),
            "Enemy unit encountered -> Lost: 3 casualties"
        );
    }

    #[test]
    fn test_random_event_outcomes_are_balanced() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut counts = [0_usize; 3];
        for _ in 0..3000 {
            let index = match rng.random::<RandomEvent>() {
                RandomEvent::FoundKit => 0,
                RandomEvent::EnemyEncounter => 1,
                RandomEvent::Reinforcements => 2,
            };
            counts[index] += 1;
        }
        for count in counts {
            assert!((850..=1150).contains(&count), "{counts:?}");
        }
    }
}
