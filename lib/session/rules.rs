use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

#[cfg(test)]
use proptest::prelude::*;

/// The options a session is created with.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(default, deny_unknown_fields)]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
pub struct Rules {
    /// Whether chatting is disabled.
    pub enforce_no_communication: bool,

    /// How long each voting window lasts.
    #[serde(with = "humantime_serde")]
    #[cfg_attr(test, strategy((15u64..=300).prop_map(Duration::from_secs)))]
    pub vote_duration: Duration,

    /// How many members each team needs before the game starts.
    #[cfg_attr(test, strategy(1usize..=8))]
    pub min_team_size: usize,

    /// Whether votes are accepted before checking that they are legal.
    ///
    /// The winning move is checked regardless before it is applied.
    pub allow_invalid_votes: bool,

    /// Whether players may join once the game has started.
    pub allow_late_joins: bool,

    /// How long the pause between turns lasts, zero for no pause.
    #[serde(with = "humantime_serde")]
    #[cfg_attr(test, strategy((0u64..=60).prop_map(Duration::from_secs)))]
    pub break_duration: Duration,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            enforce_no_communication: false,
            vote_duration: Duration::from_secs(30),
            min_team_size: 1,
            allow_invalid_votes: false,
            allow_late_joins: true,
            break_duration: Duration::ZERO,
        }
    }
}

impl Rules {
    /// The shortest voting window allowed.
    pub const MIN_VOTE_DURATION: Duration = Duration::from_secs(15);

    /// Checks that these rules make for a playable session.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.vote_duration < Self::MIN_VOTE_DURATION {
            Err(RulesError::VoteTooShort)
        } else if self.min_team_size == 0 {
            Err(RulesError::EmptyTeams)
        } else {
            Ok(())
        }
    }
}

/// The reason why [`Rules`] are not playable.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum RulesError {
    #[display(fmt = "votes must last at least 15 seconds")]
    VoteTooShort,
    #[display(fmt = "teams need at least one member")]
    EmptyTeams,
}

/// The reason why parsing [`Rules`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse session rules")]
pub struct ParseRulesError(ron::de::SpannedError);

impl FromStr for Rules {
    type Err = ParseRulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
