use derive_more::{Display, Error};
use std::{ops::Not, str::FromStr};

/// One of the two sides of a game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Team {
    #[display(fmt = "1")]
    One = 1,
    #[display(fmt = "2")]
    Two = 2,
}

impl Team {
    /// Both teams, in turn order.
    pub const ALL: [Team; 2] = [Team::One, Team::Two];

    /// The direction in which this team's pawns advance along the ranks.
    #[inline(always)]
    pub fn advance(&self) -> i8 {
        match self {
            Team::One => 1,
            Team::Two => -1,
        }
    }

    /// This team's zero-based index.
    #[inline(always)]
    pub fn index(&self) -> usize {
        *self as usize - 1
    }
}

impl Not for Team {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

/// The reason why parsing [`Team`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse team, expected `1` or `2`")]
pub struct ParseTeamError;

impl FromStr for Team {
    type Err = ParseTeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Team::One),
            "2" => Ok(Team::Two),
            _ => Err(ParseTeamError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn team_implements_not_operator(t: Team) {
        assert_eq!(!!t, t);
        assert_ne!(!t, t);
    }

    #[proptest]
    fn opposing_teams_advance_in_opposite_directions(t: Team) {
        assert_eq!(t.advance(), -(!t).advance());
    }

    #[proptest]
    fn parsing_printed_team_is_an_identity(t: Team) {
        assert_eq!(t.to_string().parse(), Ok(t));
    }

    #[proptest]
    fn parsing_team_fails_if_not_1_or_2(#[filter(#s != "1" && #s != "2")] s: String) {
        assert_eq!(s.parse::<Team>(), Err(ParseTeamError));
    }
}
