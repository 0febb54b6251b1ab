use crate::chess::{Move, Square};
use crate::player::PlayerId;
use std::hash::{Hash, Hasher};

mod ballot;
mod tally;

pub use ballot::*;
pub use tally::*;

/// A player's proposal for the next move of their team.
///
/// Votes compare equal whenever they propose the same [`Move`], regardless
/// of who cast them, which is what makes counting them meaningful.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Vote {
    proposal: Move,
    voter: PlayerId,
}

impl Vote {
    /// Constructs a [`Vote`] for moving from `whence` to `whither`.
    pub fn new(whence: Square, whither: Square, voter: PlayerId) -> Self {
        Vote {
            proposal: Move::new(whence, whither),
            voter,
        }
    }

    /// The proposed [`Move`].
    #[inline(always)]
    pub fn proposal(&self) -> Move {
        self.proposal
    }

    /// Who cast this vote.
    #[inline(always)]
    pub fn voter(&self) -> PlayerId {
        self.voter
    }
}

impl PartialEq for Vote {
    fn eq(&self, other: &Self) -> bool {
        self.proposal == other.proposal
    }
}

impl Eq for Vote {}

impl Hash for Vote {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.proposal.hash(state)
    }
}
