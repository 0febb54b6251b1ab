use crate::chess::{ParseTeamError, Team};
use derive_more::{Display, From};
use std::str::FromStr;

/// Identifies a connected player.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct PlayerId(u64);

impl PlayerId {
    /// Constructs [`PlayerId`] from a raw number.
    #[inline(always)]
    pub fn new(n: u64) -> Self {
        PlayerId(n)
    }

    /// The raw number.
    #[inline(always)]
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// The team a player asks to be placed on.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum TeamPreference {
    #[display(fmt = "{}", _0)]
    Team(Team),
    #[default]
    #[display(fmt = "random")]
    Random,
}

impl TeamPreference {
    /// Settles the preference on a [`Team`].
    pub fn pick(self) -> Team {
        match self {
            TeamPreference::Team(t) => t,
            TeamPreference::Random if rand::random() => Team::One,
            TeamPreference::Random => Team::Two,
        }
    }
}

impl From<Team> for TeamPreference {
    fn from(t: Team) -> Self {
        TeamPreference::Team(t)
    }
}

impl FromStr for TeamPreference {
    type Err = ParseTeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(TeamPreference::Random),
            s => Ok(TeamPreference::Team(s.parse()?)),
        }
    }
}
