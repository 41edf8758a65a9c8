//! Board-level data structures: hazards, feature pools, the board itself and
//! the specialist soldiers that react to what is found on it.

pub use self::{board::*, feature_pool::*, hazard::*, soldier::*, troops::*};

pub(crate) mod board;
pub(crate) mod feature_pool;
pub(crate) mod hazard;
pub(crate) mod soldier;
pub(crate) mod troops;
