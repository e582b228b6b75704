//! The three-symbol move alphabet and its cyclic dominance relation

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of symbols in the alphabet
pub const MOVE_COUNT: usize = 3;

/// A single throw
///
/// The discriminants are the stable indices used by every count and
/// probability vector in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Move {
    /// All moves in index order
    pub const ALL: [Move; MOVE_COUNT] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Stable index (0, 1, 2)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Move::index`]; `None` for anything outside 0..3.
    pub fn from_index(index: usize) -> Option<Move> {
        Move::ALL.get(index).copied()
    }

    /// The move this one defeats
    pub fn beats(self) -> Move {
        Move::ALL[(self.index() + 2) % MOVE_COUNT]
    }

    /// The move that defeats this one
    pub fn beaten_by(self) -> Move {
        Move::ALL[(self.index() + 1) % MOVE_COUNT]
    }

    /// Whether `self` wins against `other`
    pub fn defeats(self, other: Move) -> bool {
        self.beats() == other
    }

    /// Single-letter label used on the console and in exported logs
    pub fn letter(self) -> char {
        match self {
            Move::Rock => 'R',
            Move::Paper => 'P',
            Move::Scissors => 'S',
        }
    }

    /// Uniformly random move
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Move {
        Move::ALL[rng.random_range(0..MOVE_COUNT)]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        };
        f.write_str(label)
    }
}

impl FromStr for Move {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "rock" => Ok(Move::Rock),
            "p" | "paper" => Ok(Move::Paper),
            "s" | "scissors" => Ok(Move::Scissors),
            _ => Err(crate::Error::InvalidMove {
                input: s.to_string(),
            }),
        }
    }
}

impl TryFrom<usize> for Move {
    type Error = crate::Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Move::from_index(index).ok_or_else(|| crate::Error::InvalidMove {
            input: index.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominance_matches_the_classic_rules() {
        assert!(Move::Rock.defeats(Move::Scissors));
        assert!(Move::Paper.defeats(Move::Rock));
        assert!(Move::Scissors.defeats(Move::Paper));

        for mv in Move::ALL {
            assert!(!mv.defeats(mv), "{mv} must tie with itself");
            assert_eq!(mv.beats().beaten_by().beaten_by(), mv);
            assert_ne!(mv.beats(), mv.beaten_by());
        }
    }

    #[test]
    fn parses_letters_and_names_case_insensitively() {
        assert_eq!("r".parse::<Move>().unwrap(), Move::Rock);
        assert_eq!(" Paper ".parse::<Move>().unwrap(), Move::Paper);
        assert_eq!("S".parse::<Move>().unwrap(), Move::Scissors);
        assert!(matches!(
            "x".parse::<Move>(),
            Err(crate::Error::InvalidMove { .. })
        ));
    }

    #[test]
    fn index_round_trips_and_rejects_out_of_range() {
        for mv in Move::ALL {
            assert_eq!(Move::from_index(mv.index()), Some(mv));
        }
        assert!(Move::try_from(3usize).is_err());
    }
}
