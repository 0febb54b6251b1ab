use crate::chess::{IllegalMove, Move, Team};
use crate::session::Signal;
use derive_more::Display;

/// How a turn was resolved.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash)]
pub enum Resolution {
    #[display(fmt = "nobody voted")]
    NoVote,

    #[display(fmt = "the vote was tied")]
    Tied(Vec<Move>),

    #[display(fmt = "no unit stands on the origin of {}", _0)]
    NoUnit(Move),

    #[display(fmt = "{} would move a unit of the other team", _0)]
    WrongUnit(Move),

    #[display(fmt = "{}", _0)]
    Illegal(IllegalMove),

    #[display(fmt = "applied {}", _0)]
    Applied(Move),
}

impl Resolution {
    /// The [`Signal`] that reports this resolution.
    pub fn signal(&self) -> Signal {
        match self {
            Resolution::NoVote => Signal::NoVote,
            Resolution::Tied(_) => Signal::Tied,
            Resolution::NoUnit(_) => Signal::NoUnit,
            Resolution::WrongUnit(_) => Signal::WrongUnit,
            Resolution::Illegal(_) => Signal::IllegalVote,
            Resolution::Applied(m) => Signal::MoveApplied(*m),
        }
    }
}

/// How a session ended.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Conclusion {
    #[display(fmt = "team {} captured the enemy king", _0)]
    Victory(Team),

    #[display(fmt = "team {} deserted", _0)]
    Desertion(Team),

    #[display(fmt = "everybody left")]
    Abandoned,

    #[display(fmt = "the session was ended")]
    Ended,
}

impl Conclusion {
    /// The winning team, if any.
    pub fn winner(&self) -> Option<Team> {
        match *self {
            Conclusion::Victory(t) => Some(t),
            Conclusion::Desertion(t) => Some(!t),
            Conclusion::Abandoned | Conclusion::Ended => None,
        }
    }

    /// The signals that announce this conclusion.
    pub fn signals(&self) -> Vec<Signal> {
        match *self {
            Conclusion::Victory(t) => vec![Signal::Won(t)],
            Conclusion::Desertion(t) => vec![Signal::Deserted(t), Signal::Won(!t)],
            Conclusion::Abandoned | Conclusion::Ended => vec![Signal::Ended],
        }
    }
}
