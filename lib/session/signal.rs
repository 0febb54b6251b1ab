use crate::chess::{Move, Team};
use crate::player::PlayerId;
use derive_more::Display;

/// A message from a session to its players, one line on the wire.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash)]
pub enum Signal {
    #[display(fmt = "GAME_START")]
    GameStart,

    /// The current board snapshot.
    #[display(fmt = "BOARD {}", _0)]
    Board(String),

    #[display(fmt = "VOTE_START {}", _0)]
    VoteStart(Team),

    #[display(fmt = "VOTE_END {}", _0)]
    VoteEnd(Team),

    /// Seconds remaining in the current window.
    #[display(fmt = "TICK {}", _0)]
    Tick(u64),

    #[display(fmt = "BREAK_START")]
    BreakStart,

    #[display(fmt = "BREAK_END")]
    BreakEnd,

    #[display(fmt = "PLAYER_JOINED {} {}", _0, _1)]
    PlayerJoined(PlayerId, Team),

    #[display(fmt = "PLAYER_LEFT {} {}", _0, _1)]
    PlayerLeft(PlayerId, Team),

    #[display(fmt = "MOVED {}", _0)]
    MoveApplied(Move),

    #[display(fmt = "VOTE_RECEIVED {}", _0)]
    VoteReceived(Move),

    #[display(fmt = "CHAT {} {}", _0, _1)]
    Chat(PlayerId, String),

    #[display(fmt = "WON {}", _0)]
    Won(Team),

    #[display(fmt = "DESERTED {}", _0)]
    Deserted(Team),

    #[display(fmt = "TIED")]
    Tied,

    #[display(fmt = "ILLEGAL_VOTE")]
    IllegalVote,

    #[display(fmt = "WRONG_UNIT")]
    WrongUnit,

    #[display(fmt = "NO_UNIT")]
    NoUnit,

    #[display(fmt = "NO_VOTE")]
    NoVote,

    /// The session ended without a winner.
    #[display(fmt = "ENDED")]
    Ended,
}
