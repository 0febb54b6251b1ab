use crate::chess::Move;
use crate::session::{RulesError, SessionId};
use derive_more::{Display, Error};

/// The reason why a request was refused.
///
/// Refusals never affect the state of the session.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum SessionError {
    #[display(fmt = "not a member of this session")]
    NotAMember,

    #[display(fmt = "already a member of a session")]
    AlreadyJoined,

    #[display(fmt = "votes are not being accepted right now")]
    NotVoting,

    #[display(fmt = "it is not your team's turn")]
    NotYourTurn,

    #[display(fmt = "invalid vote {}", _0)]
    InvalidVote(#[error(not(source))] Move),

    #[display(fmt = "communication is disabled in this session")]
    NoCommunication,

    #[display(fmt = "this session does not accept late joins")]
    LateJoinRefused,

    #[display(fmt = "the session has ended")]
    SessionEnded,

    #[display(fmt = "no session {}", _0)]
    UnknownSession(#[error(not(source))] SessionId),

    #[display(fmt = "invalid rules")]
    InvalidRules(RulesError),
}

impl From<RulesError> for SessionError {
    fn from(e: RulesError) -> Self {
        SessionError::InvalidRules(e)
    }
}
