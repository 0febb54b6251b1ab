use derive_more::{Display, Error};
use std::str::FromStr;

/// A column on the board, numbered from `1`.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct File(#[cfg_attr(test, strategy(1u8..=8))] u8);

impl File {
    /// The leftmost file.
    pub const FIRST: Self = File(1);

    /// Constructs [`File`] from its number.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[inline(always)]
    pub fn new(n: u8) -> Self {
        assert!(n > 0, "files are numbered from 1");
        File(n)
    }

    /// This file's number.
    #[inline(always)]
    pub fn get(&self) -> u8 {
        self.0
    }

    /// The file `d` columns away, if any.
    #[inline(always)]
    pub fn offset(self, d: i8) -> Option<Self> {
        self.0.checked_add_signed(d).filter(|&n| n > 0).map(File)
    }
}

/// The reason why parsing [`File`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse file, expected a positive number")]
pub struct ParseFileError;

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u8>() {
            Ok(n) if n > 0 && s.bytes().all(|b| b.is_ascii_digit()) => Ok(File(n)),
            _ => Err(ParseFileError),
        }
    }
}
