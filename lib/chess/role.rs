use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// The type of a [`Unit`][`crate::chess::Unit`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl Role {
    /// All roles.
    pub const ALL: [Role; 6] = [
        Role::King,
        Role::Queen,
        Role::Rook,
        Role::Bishop,
        Role::Knight,
        Role::Pawn,
    ];

    /// The back rank, from the first file to the last.
    pub const BACK_RANK: [Role; 8] = [
        Role::Rook,
        Role::Knight,
        Role::Bishop,
        Role::Queen,
        Role::King,
        Role::Bishop,
        Role::Knight,
        Role::Rook,
    ];
}

/// The short code used in board snapshots.
impl fmt::Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Role::King => f.write_char('K'),
            Role::Queen => f.write_char('Q'),
            Role::Rook => f.write_char('R'),
            Role::Bishop => f.write_char('B'),
            Role::Knight => f.write_char('N'),
            Role::Pawn => f.write_char('P'),
        }
    }
}

/// The reason why parsing [`Role`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse role")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "K" => Ok(Role::King),
            "Q" => Ok(Role::Queen),
            "R" => Ok(Role::Rook),
            "B" => Ok(Role::Bishop),
            "N" => Ok(Role::Knight),
            "P" => Ok(Role::Pawn),
            _ => Err(ParseRoleError),
        }
    }
}
