use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Traversal order of the squad over the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Boustrophedon: even rows left to right, odd rows right to left.
    #[default]
    Horizontal,
    /// Main diagonal only: `(0, 0), (1, 1), ..., (N-1, N-1)`.
    Diagonal,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown path kind: {value} (expected Horizontal or Diagonal)")]
pub struct ParsePathKindError {
    pub value: String,
}

impl PathKind {
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Diagonal];

    /// Number of cells visited on a board of `size`.
    #[must_use]
    pub const fn cell_count(self, size: usize) -> usize {
        match self {
            Self::Horizontal => size * size,
            Self::Diagonal => size,
        }
    }

    /// The `index`-th coordinate visited on a board of `size`, if any.
    #[must_use]
    pub const fn coordinate_at(self, size: usize, index: usize) -> Option<Coordinate> {
        if index >= self.cell_count(size) {
            return None;
        }
        let coordinate = match self {
            Self::Horizontal => {
                let x = index / size;
                let offset = index % size;
                let y = if x % 2 == 0 { offset } else { size - 1 - offset };
                Coordinate::new(x, y)
            }
            Self::Diagonal => Coordinate::new(index, index),
        };
        Some(coordinate)
    }

    /// All coordinates visited on a board of `size`, in order.
    pub fn coordinates(self, size: usize) -> impl Iterator<Item = Coordinate> {
        (0..self.cell_count(size)).filter_map(move |i| self.coordinate_at(size, i))
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Horizontal => "Horizontal",
            Self::Diagonal => "Diagonal",
        };
        f.write_str(name)
    }
}

impl FromStr for PathKind {
    type Err = ParsePathKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePathKindError {
                value: s.to_owned(),
            })
    }
}

/// Position of the squad along its path; yields each coordinate once.
#[derive(Debug, Clone)]
pub struct PathCursor {
    kind: PathKind,
    size: usize,
    visited: usize,
}

impl PathCursor {
    #[must_use]
    pub const fn new(kind: PathKind, size: usize) -> Self {
        Self {
            kind,
            size,
            visited: 0,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PathKind {
        self.kind
    }

    #[must_use]
    pub const fn visited(&self) -> usize {
        self.visited
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.kind.cell_count(self.size)
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.visited < self.total()
    }

    /// The coordinate the next call to [`Self::advance`] will return.
    #[must_use]
    pub const fn peek(&self) -> Option<Coordinate> {
        self.kind.coordinate_at(self.size, self.visited)
    }

    pub fn advance(&mut self) -> Option<Coordinate> {
        let coordinate = self.peek()?;
        self.visited += 1;
        Some(coordinate)
    }
}
