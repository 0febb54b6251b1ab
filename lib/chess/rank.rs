use derive_more::Error;
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A row on the board, lettered from `A`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Rank(#[cfg_attr(test, strategy(0u8..8))] u8);

impl Rank {
    /// The first row, where team `1` sets up.
    pub const FIRST: Self = Rank(0);

    /// The highest index a rank can have, since ranks are letters.
    pub const MAX: u8 = b'Z' - b'A';

    /// Constructs [`Rank`] from its zero-based index.
    ///
    /// # Panics
    ///
    /// Panics if `i` is greater than [`Rank::MAX`].
    #[inline(always)]
    pub fn new(i: u8) -> Self {
        assert!(i <= Self::MAX, "ranks are lettered from A to Z");
        Rank(i)
    }

    /// This rank's zero-based index.
    #[inline(always)]
    pub fn index(&self) -> u8 {
        self.0
    }

    /// The rank `d` rows away, if any.
    #[inline(always)]
    pub fn offset(self, d: i8) -> Option<Self> {
        self.0
            .checked_add_signed(d)
            .filter(|&i| i <= Self::MAX)
            .map(Rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(char::from(b'A' + self.0))
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, derive_more::Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse rank, expected a letter in the range `(A..=Z)`")]
pub struct ParseRankError;

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[c] if c.is_ascii_uppercase() => Ok(Rank(c - b'A')),
            _ => Err(ParseRankError),
        }
    }
}
