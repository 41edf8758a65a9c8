use std::fmt;

use serde::{Deserialize, Serialize};

/// The true content of a board cell.
///
/// Hazards double as classification labels: `Empty = 0`, `Mine = 1`,
/// `Bomb = 2`. They serialize as these numeric labels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Hazard {
    Empty,
    Mine,
    Bomb,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hazard label: {label}")]
pub struct InvalidHazardLabelError {
    pub label: u8,
}

impl Hazard {
    pub const LEN: usize = 3;
    pub const ALL: [Self; Self::LEN] = [Self::Empty, Self::Mine, Self::Bomb];

    #[must_use]
    pub const fn label(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Mine => 1,
            Self::Bomb => 2,
        }
    }

    #[must_use]
    pub const fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(Self::Empty),
            1 => Some(Self::Mine),
            2 => Some(Self::Bomb),
            _ => None,
        }
    }

    /// Index of this hazard in per-class arrays such as [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.label() as usize
    }

    /// Whether stepping on this cell is dangerous.
    #[must_use]
    pub const fn is_explosive(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Mine => "mine",
            Self::Bomb => "bomb",
        };
        f.write_str(name)
    }
}

impl From<Hazard> for u8 {
    fn from(hazard: Hazard) -> Self {
        hazard.label()
    }
}

impl TryFrom<u8> for Hazard {
    type Error = InvalidHazardLabelError;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        Self::from_label(label).ok_or(InvalidHazardLabelError { label })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_roundtrip() {
        for hazard in Hazard::ALL {
            assert_eq!(Hazard::from_label(hazard.label()), Some(hazard));
            assert_eq!(Hazard::ALL[hazard.index()], hazard);
        }
        assert_eq!(Hazard::from_label(3), None);
    }

    #[test]
    fn test_serializes_as_numeric_label() {
        assert_eq!(serde_json::to_string(&Hazard::Bomb).unwrap(), "2");
        let hazard: Hazard = serde_json::from_str("1").unwrap();
        assert_eq!(hazard, Hazard::Mine);
        assert!(serde_json::from_str::<Hazard>("7").is_err());
    }
}
