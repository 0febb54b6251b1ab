use crate::player::PlayerId;
use crate::vote::{Tally, Vote};
use dashmap::DashMap;

/// The votes cast during a turn, at most one per voter.
///
/// Safe to write from any number of threads, a later vote replaces the
/// voter's earlier one.
#[derive(Debug, Default)]
pub struct Ballot {
    votes: DashMap<PlayerId, Vote>,
}

impl Ballot {
    /// Records a vote, returning the one it replaced, if any.
    pub fn cast(&self, vote: Vote) -> Option<Vote> {
        self.votes.insert(vote.voter(), vote)
    }

    /// The vote of a voter, if any.
    pub fn get(&self, voter: PlayerId) -> Option<Vote> {
        self.votes.get(&voter).map(|v| *v)
    }

    /// The number of voters.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// Whether nobody voted.
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Discards all votes.
    pub fn clear(&self) {
        self.votes.clear()
    }

    /// Counts the votes by plurality.
    pub fn tally(&self) -> Tally {
        let votes: Vec<Vote> = self.votes.iter().map(|v| *v.value()).collect();
        Tally::count(&votes)
    }
}
