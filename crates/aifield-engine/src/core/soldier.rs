use rand::Rng;
use serde::Serialize;

use crate::Hazard;

pub const INITIAL_HEALTH: u32 = 100;
pub const INITIAL_ARMOR: u32 = 100;
pub const INITIAL_DISARMING_KITS: u32 = 1;

const MINE_DAMAGE: u32 = 50;
const BOMB_DAMAGE: u32 = 100;

/// Reaction rules shared by every specialist soldier.
///
/// A soldier whose health drops to zero is depleted and must not be put back
/// into the specialist pool.
pub trait Soldier {
    fn health(&self) -> u32;

    fn react_to_mine(&mut self);

    fn react_to_bomb(&mut self);

    #[must_use]
    fn is_depleted(&self) -> bool {
        self.health() == 0
    }

    /// Dispatches to the reaction matching `hazard`. Empty cells are a no-op.
    fn react_to(&mut self, hazard: Hazard) {
        match hazard {
            Hazard::Empty => {}
            Hazard::Mine => self.react_to_mine(),
            Hazard::Bomb => self.react_to_bomb(),
        }
    }
}

/// Armored soldier that absorbs blasts with armor before health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Heavy {
    health: u32,
    armor: u32,
}

impl Default for Heavy {
    fn default() -> Self {
        Self::new(INITIAL_HEALTH)
    }
}

impl Heavy {
    #[must_use]
    pub const fn new(health: u32) -> Self {
        Self {
            health,
            armor: INITIAL_ARMOR,
        }
    }

    #[must_use]
    pub const fn with_armor(health: u32, armor: u32) -> Self {
        Self { health, armor }
    }

    #[must_use]
    pub const fn armor(&self) -> u32 {
        self.armor
    }

    /// Covering the squad from an enemy unit is always fatal.
    pub fn react_to_enemy(&mut self) {
        self.health = 0;
        self.armor = 0;
    }
}

impl Soldier for Heavy {
    fn health(&self) -> u32 {
        self.health
    }

    fn react_to_mine(&mut self) {
        if self.armor >= MINE_DAMAGE {
            self.armor -= MINE_DAMAGE;
        } else if self.health >= MINE_DAMAGE {
            self.health -= MINE_DAMAGE;
        }
    }

    fn react_to_bomb(&mut self) {
        if self.armor > MINE_DAMAGE {
            // armor never goes below zero; the excess blast is absorbed
            self.armor = self.armor.saturating_sub(BOMB_DAMAGE);
        } else if self.armor == MINE_DAMAGE {
            self.armor = 0;
            self.health = MINE_DAMAGE;
        } else {
            self.health = 0;
        }
    }
}

/// Soldier that disarms hazards by spending disarming kits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sapper {
    health: u32,
    disarming_kits: u32,
}

impl Default for Sapper {
    fn default() -> Self {
        Self::new(INITIAL_HEALTH, INITIAL_DISARMING_KITS)
    }
}

impl Sapper {
    #[must_use]
    pub const fn new(health: u32, disarming_kits: u32) -> Self {
        Self {
            health,
            disarming_kits,
        }
    }

    #[must_use]
    pub const fn disarming_kits(&self) -> u32 {
        self.disarming_kits
    }

    /// Adds one or two kits at random and returns how many were added.
    pub fn add_kit<R>(&mut self, rng: &mut R) -> u32
    where
        R: Rng + ?Sized,
    {
        let kits = rng.random_range(1..=2);
        self.disarming_kits += kits;
        kits
    }
}

impl Soldier for Sapper {
    fn health(&self) -> u32 {
        self.health
    }

    fn react_to_mine(&mut self) {
        if self.disarming_kits > 0 {
            self.disarming_kits -= 1;
        } else {
            self.health = 0;
        }
    }

    fn react_to_bomb(&mut self) {
        if self.disarming_kits >= 2 {
            self.disarming_kits -= 2;
        } else {
            self.health = 0;
        }
    }
}

/// A member of the specialist pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::From, derive_more::IsVariant)]
pub enum Specialist {
    Heavy(Heavy),
    Sapper(Sapper),
}

impl Soldier for Specialist {
    fn health(&self) -> u32 {
        match self {
            Self::Heavy(heavy) => heavy.health(),
            Self::Sapper(sapper) => sapper.health(),
        }
    }

    fn react_to_mine(&mut self) {
        match self {
            Self::Heavy(heavy) => heavy.react_to_mine(),
            Self::Sapper(sapper) => sapper.react_to_mine(),
        }
    }

    fn react_to_bomb(&mut self) {
        match self {
            Self::Heavy(heavy) => heavy.react_to_bomb(),
            Self::Sapper(sapper) => sapper.react_to_bomb(),
        }
    }
}
