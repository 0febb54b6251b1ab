use crate::chess::{File, ParseFileError, ParseRankError, Rank};
use derive_more::{Display, Error, From};
use std::{fmt, str::FromStr};

/// A square on the board, identified by its [`File`] and [`Rank`].
///
/// Squares are plain coordinates, whether one actually lies on a given
/// [`Board`][`crate::chess::Board`] is for the board to decide.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square {
    rank: Rank,
    file: File,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub fn new(file: File, rank: Rank) -> Self {
        Square { rank, file }
    }

    /// This square's [`File`].
    #[inline(always)]
    pub fn file(&self) -> File {
        self.file
    }

    /// This square's [`Rank`].
    #[inline(always)]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The square `df` files and `dr` ranks away, if the coordinate exists.
    #[inline(always)]
    pub fn offset(self, (df, dr): (i8, i8)) -> Option<Self> {
        Some(Square::new(self.file.offset(df)?, self.rank.offset(dr)?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file, f)?;
        fmt::Display::fmt(&self.rank, f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}
