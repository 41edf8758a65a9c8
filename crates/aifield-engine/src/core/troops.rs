use rand::{Rng, seq::SliceRandom as _};

use crate::{Heavy, Sapper, Specialist};

/// Percentage of the headcount deployed as Heavy soldiers.
const HEAVY_PERCENT: u32 = 3;
/// Percentage of the headcount deployed as Sappers.
const SAPPER_PERCENT: u32 = 2;

/// `floor(value * percent / 100)` without overflowing for any `value`.
const fn percent_of(value: u32, percent: u32) -> u32 {
    value / 100 * percent + value % 100 * percent / 100
}

/// The pool of specialist soldiers available to the squad.
///
/// Bad predictions take the most recently returned specialist from the back
/// of the pool; random events search from the front for a specific kind.
///
/// # Example
///
/// ```
/// use aifield_engine::Troops;
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let troops = Troops::create(100, &mut Pcg32::seed_from_u64(0));
/// assert_eq!(troops.heavy_count(), 3);
/// assert_eq!(troops.sapper_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Troops {
    specialists: Vec<Specialist>,
}

impl Troops {
    /// Number of Heavy soldiers and Sappers deployed for `headcount` soldiers.
    #[must_use]
    pub const fn composition(headcount: u32) -> (usize, usize) {
        (
            percent_of(headcount, HEAVY_PERCENT) as usize,
            percent_of(headcount, SAPPER_PERCENT) as usize,
        )
    }

    /// Builds the specialist pool for `headcount` soldiers in shuffled order.
    pub fn create<R>(headcount: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let (num_heavy, num_sapper) = Self::composition(headcount);
        let mut specialists = Vec::with_capacity(num_heavy + num_sapper);
        specialists.extend((0..num_heavy).map(|_| Specialist::Heavy(Heavy::default())));
        specialists.extend((0..num_sapper).map(|_| Specialist::Sapper(Sapper::default())));
        specialists.shuffle(rng);
        Self { specialists }
    }

    #[must_use]
    pub fn from_specialists(specialists: Vec<Specialist>) -> Self {
        Self { specialists }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }

    #[must_use]
    pub fn heavy_count(&self) -> usize {
        self.specialists.iter().filter(|s| s.is_heavy()).count()
    }

    #[must_use]
    pub fn sapper_count(&self) -> usize {
        self.specialists.iter().filter(|s| s.is_sapper()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Specialist> + '_ {
        self.specialists.iter()
    }

    /// Takes the specialist at the back of the pool.
    pub fn pop(&mut self) -> Option<Specialist> {
        self.specialists.pop()
    }

    /// Returns a specialist to the back of the pool.
    pub fn push(&mut self, specialist: Specialist) {
        self.specialists.push(specialist);
    }

    /// Removes the first Heavy soldier in pool order.
    pub fn take_first_heavy(&mut self) -> Option<Heavy> {
        let index = self.specialists.iter().position(Specialist::is_heavy)?;
        match self.specialists.remove(index) {
            Specialist::Heavy(heavy) => Some(heavy),
            Specialist::Sapper(_) => unreachable!("position matched a Heavy"),
        }
    }

    /// Removes the first Sapper in pool order.
    pub fn take_first_sapper(&mut self) -> Option<Sapper> {
        let index = self.specialists.iter().position(Specialist::is_sapper)?;
        match self.specialists.remove(index) {
            Specialist::Sapper(sapper) => Some(sapper),
            Specialist::Heavy(_) => unreachable!("position matched a Sapper"),
        }
    }
}
