use crate::chess::{ParseSquareError, Square};
use derive_more::{Constructor, Display, Error, From};
use std::str::FromStr;

/// A unit's move, from one [`Square`] to another.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{} {}", whence, whither)]
pub struct Move {
    whence: Square,
    whither: Square,
}

impl Move {
    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.whither
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "failed to parse move, expected two squares")]
    #[from(ignore)]
    Malformed,
    #[display(fmt = "failed to parse move")]
    InvalidSquare(ParseSquareError),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_whitespace().collect::<Vec<_>>()[..] {
            [whence, whither] => Ok(Move::new(whence.parse()?, whither.parse()?)),
            _ => Err(ParseMoveError::Malformed),
        }
    }
}
