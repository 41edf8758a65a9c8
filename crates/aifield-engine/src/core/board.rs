use std::fmt;

use rand::{Rng, seq::SliceRandom as _};
use rand_distr::{Binomial, Distribution as _};
use serde::{Deserialize, Serialize};

use crate::{
    BoardError, ConfigurationError, FeaturePool, FeatureVector, Hazard,
    InsufficientFeaturePoolError,
};

/// Number of Bernoulli trials per cell; a cell's label is the number of successes.
const HAZARD_TRIALS: u64 = 2;

/// A cell position: `x` is the row, `y` the column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}]", self.x, self.y)
    }
}

/// Square grid of true hazard labels, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardGrid {
    size: usize,
    cells: Vec<Hazard>,
}

impl HazardGrid {
    /// Draws every cell independently from Binomial(2, `mine_probability`).
    ///
    /// Zero successes is an empty cell, one a mine, two a bomb.
    pub fn generate<R>(
        size: usize,
        mine_probability: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError>
    where
        R: Rng + ?Sized,
    {
        if size == 0 {
            return Err(ConfigurationError::InvalidBoardSize);
        }
        if !(mine_probability > 0.0 && mine_probability < 1.0) {
            return Err(ConfigurationError::InvalidMineProbability {
                probability: mine_probability,
            });
        }
        let binomial = Binomial::new(HAZARD_TRIALS, mine_probability).map_err(|_| {
            ConfigurationError::InvalidMineProbability {
                probability: mine_probability,
            }
        })?;
        let cells = (0..size * size)
            .map(|_| match binomial.sample(rng) {
                0 => Hazard::Empty,
                1 => Hazard::Mine,
                _ => Hazard::Bomb,
            })
            .collect();
        Ok(Self { size, cells })
    }

    /// Builds a grid from explicit rows. The rows must form a non-empty square.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Hazard>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return Err(ConfigurationError::InvalidBoardSize);
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, coordinate: Coordinate) -> Hazard {
        self.cells[coordinate.x * self.size + coordinate.y]
    }

    #[must_use]
    pub fn count(&self, hazard: Hazard) -> usize {
        self.cells.iter().filter(|cell| **cell == hazard).count()
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, Hazard)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, hazard)| (Coordinate::new(i / self.size, i % self.size), *hazard))
    }
}

/// Feature vectors parallel to a [`HazardGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGrid {
    size: usize,
    width: usize,
    cells: Vec<FeatureVector>,
}

impl FeatureGrid {
    /// Assigns a pool vector of the matching class to every cell.
    ///
    /// Each class's pool is shuffled once, then consumed in row-major scan
    /// order. Fails before assigning anything if some class has more cells
    /// than pool samples.
    pub fn assign<R>(
        hazards: &HazardGrid,
        pool: &FeaturePool,
        rng: &mut R,
    ) -> Result<Self, InsufficientFeaturePoolError>
    where
        R: Rng + ?Sized,
    {
        for hazard in Hazard::ALL {
            let required = hazards.count(hazard);
            let available = pool.len(hazard);
            if required > available {
                return Err(InsufficientFeaturePoolError {
                    hazard,
                    required,
                    available,
                });
            }
        }

        let mut orders = Hazard::ALL.map(|hazard| {
            let mut order = (0..pool.len(hazard)).collect::<Vec<_>>();
            order.shuffle(rng);
            order.into_iter()
        });

        let cells = hazards
            .cells()
            .map(|(_, hazard)| {
                let index = orders[hazard.index()]
                    .next()
                    .expect("pool size checked above");
                pool.samples(hazard)[index].clone()
            })
            .collect();
        Ok(Self {
            size: hazards.size(),
            width: pool.width(),
            cells,
        })
    }

    /// Length of every feature vector on the grid.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn get(&self, coordinate: Coordinate) -> &[f32] {
        &self.cells[coordinate.x * self.size + coordinate.y]
    }
}

/// The minefield: true hazards plus the features the predictor sees.
///
/// # Example
///
/// ```
/// use aifield_engine::{Board, FeaturePool, Hazard};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut pool = FeaturePool::new(1);
/// for hazard in Hazard::ALL {
///     for i in 0..16 {
///         pool.push(hazard, vec![i as f32]).unwrap();
///     }
/// }
/// let mut rng = Pcg32::seed_from_u64(7);
/// let board = Board::new(4, 0.3, &pool, &mut rng).unwrap();
///
/// assert_eq!(
///     board.amount_of_empty() + board.amount_of_mines() + board.amount_of_bombs(),
///     16
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    mine_probability: f64,
    hazards: HazardGrid,
    features: FeatureGrid,
    amount_of_empty: usize,
    amount_of_mines: usize,
    amount_of_bombs: usize,
}

impl Board {
    pub fn new<R>(
        size: usize,
        mine_probability: f64,
        pool: &FeaturePool,
        rng: &mut R,
    ) -> Result<Self, BoardError>
    where
        R: Rng + ?Sized,
    {
        let hazards = HazardGrid::generate(size, mine_probability, rng)?;
        Self::with_hazards(hazards, mine_probability, pool, rng)
    }

    /// Like [`Self::new`], but with a predetermined hazard layout.
    pub fn with_hazards<R>(
        hazards: HazardGrid,
        mine_probability: f64,
        pool: &FeaturePool,
        rng: &mut R,
    ) -> Result<Self, BoardError>
    where
        R: Rng + ?Sized,
    {
        let features = FeatureGrid::assign(&hazards, pool, rng)?;
        Ok(Self {
            mine_probability,
            amount_of_empty: hazards.count(Hazard::Empty),
            amount_of_mines: hazards.count(Hazard::Mine),
            amount_of_bombs: hazards.count(Hazard::Bomb),
            hazards,
            features,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.hazards.size()
    }

    #[must_use]
    pub fn mine_probability(&self) -> f64 {
        self.mine_probability
    }

    #[must_use]
    pub fn feature_width(&self) -> usize {
        self.features.width()
    }

    #[must_use]
    pub fn hazards(&self) -> &HazardGrid {
        &self.hazards
    }

    #[must_use]
    pub fn hazard_at(&self, coordinate: Coordinate) -> Hazard {
        self.hazards.get(coordinate)
    }

    #[must_use]
    pub fn features_at(&self, coordinate: Coordinate) -> &[f32] {
        self.features.get(coordinate)
    }

    #[must_use]
    pub fn amount_of_empty(&self) -> usize {
        self.amount_of_empty
    }

    #[must_use]
    pub fn amount_of_mines(&self) -> usize {
        self.amount_of_mines
    }

    #[must_use]
    pub fn amount_of_bombs(&self) -> usize {
        self.amount_of_bombs
    }
}
