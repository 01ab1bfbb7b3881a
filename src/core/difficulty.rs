//! Difficulty catalog
//!
//! A fixed table of three profiles. Each profile fixes the secret range and
//! the number of attempts a round allows.

use super::GameError;
use std::fmt;
use std::str::FromStr;

/// An immutable (range, attempts) pair defining one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// Human readable name shown in selectors
    pub name: &'static str,
    /// Upper bound of the secret range (lower bound is always 1), at least 1
    pub range_max: u32,
    /// Number of guesses allowed per round
    pub max_attempts: u32,
    /// Label persisted with each result record
    pub label: &'static str,
}

/// Keys of the difficulty catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

const EASY: DifficultyProfile = DifficultyProfile {
    name: "Easy (1-100, 7 attempts)",
    range_max: 100,
    max_attempts: 7,
    label: "FACIL",
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    name: "Medium (1-500, 6 attempts)",
    range_max: 500,
    max_attempts: 6,
    label: "MEDIO",
};

const HARD: DifficultyProfile = DifficultyProfile {
    name: "Hard (1-1000, 5 attempts)",
    range_max: 1000,
    max_attempts: 5,
    label: "DIFICIL",
};

impl Difficulty {
    /// Catalog order, as shown in selectors
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Index of the default selection in [`Difficulty::ALL`]
    pub const DEFAULT_INDEX: usize = 1;

    /// Look up the profile for this key
    #[inline]
    #[must_use]
    pub const fn profile(self) -> &'static DifficultyProfile {
        match self {
            Self::Easy => &EASY,
            Self::Medium => &MEDIUM,
            Self::Hard => &HARD,
        }
    }

    /// Short lowercase key, as accepted on the command line
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// The next entry in catalog order, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" | "1" => Ok(Self::Easy),
            "medium" | "m" | "2" => Ok(Self::Medium),
            "hard" | "h" | "3" => Ok(Self::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_values() {
        assert_eq!(Difficulty::Easy.profile().range_max, 100);
        assert_eq!(Difficulty::Easy.profile().max_attempts, 7);
        assert_eq!(Difficulty::Medium.profile().range_max, 500);
        assert_eq!(Difficulty::Medium.profile().max_attempts, 6);
        assert_eq!(Difficulty::Hard.profile().range_max, 1000);
        assert_eq!(Difficulty::Hard.profile().max_attempts, 5);
    }

    #[test]
    fn default_is_medium_at_index_one() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::ALL[Difficulty::DEFAULT_INDEX], Difficulty::Medium);
    }

    #[test]
    fn labels_are_persisted_names() {
        let labels: Vec<_> = Difficulty::ALL.iter().map(|d| d.profile().label).collect();
        assert_eq!(labels, ["FACIL", "MEDIO", "DIFICIL"]);
    }

    #[test]
    fn parse_keys() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("2".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn next_cycles_through_catalog() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }
}
