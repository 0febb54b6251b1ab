use clap::Parser;
use lib::{chess::Square, player::TeamPreference, session::SessionId};

/// A request from a connected player, one line on the wire.
#[derive(Debug, Eq, PartialEq, Parser)]
#[clap(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub enum Request {
    /// Creates a session and joins it.
    Create {
        /// The team to join.
        #[clap(short, long, default_value_t)]
        team: TeamPreference,

        /// The session rules in RON notation.
        rules: Vec<String>,
    },

    /// Joins an existing session.
    Join {
        id: SessionId,

        /// The team to join.
        #[clap(short, long, default_value_t)]
        team: TeamPreference,
    },

    /// Leaves the current session.
    Leave,

    /// Votes for a move of the current session.
    Vote { whence: Square, whither: Square },

    /// Messages the player's team.
    Chat {
        #[clap(required = true)]
        words: Vec<String>,
    },

    /// Lists live sessions.
    List,

    /// Shows the board of the current session.
    Board,
}

impl Request {
    /// Parses a line of text.
    pub fn parse(line: &str) -> Result<Self, clap::Error> {
        Request::try_parse_from(line.split_whitespace())
    }
}
