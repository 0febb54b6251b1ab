use crate::chess::Move;
use crate::vote::Vote;
use std::collections::{BinaryHeap, HashMap};

/// The result of counting the votes of a turn.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Tally {
    /// Nobody voted.
    Empty,

    /// Two or more moves share the highest count.
    Tied(Vec<Move>, usize),

    /// A single move has the highest count.
    Elected(Move, usize),
}

impl Tally {
    /// Counts votes by plurality.
    pub fn count<'a, I: IntoIterator<Item = &'a Vote>>(votes: I) -> Self {
        let mut groups = HashMap::<&Vote, usize>::new();
        for v in votes {
            *groups.entry(v).or_default() += 1;
        }

        let mut heap: BinaryHeap<_> = groups
            .into_iter()
            .map(|(v, n)| (n, v.proposal()))
            .collect();

        let Some((count, leader)) = heap.pop() else {
            return Tally::Empty;
        };

        match heap.peek() {
            Some(&(n, _)) if n == count => {
                let mut tied = vec![leader];
                while let Some((_, m)) = heap.pop().filter(|&(n, _)| n == count) {
                    tied.push(m);
                }

                tied.sort();
                Tally::Tied(tied, count)
            }

            _ => Tally::Elected(leader, count),
        }
    }

    /// The elected move, if any.
    pub fn elected(&self) -> Option<Move> {
        match *self {
            Tally::Elected(m, _) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;
    use proptest::{collection::vec, prelude::*};
    use test_strategy::proptest;

    fn ballots(groups: &[(Move, usize)]) -> Vec<Vote> {
        let mut voter = 0;
        let mut votes = Vec::new();

        for &(m, n) in groups {
            for _ in 0..n {
                voter += 1;
                votes.push(Vote::new(m.whence(), m.whither(), PlayerId::new(voter)));
            }
        }

        votes
    }

    #[test]
    fn no_votes_is_an_empty_tally() {
        assert_eq!(Tally::count(&Vec::new()), Tally::Empty);
    }

    #[proptest]
    fn a_tie_at_the_top_elects_nobody(
        a: Move,
        #[filter(#a != #b)] b: Move,
        #[filter(#c != #a && #c != #b)] c: Move,
    ) {
        let votes = ballots(&[(a, 5), (b, 5), (c, 2)]);
        let mut tied = vec![a, b];
        tied.sort();
        assert_eq!(Tally::count(&votes), Tally::Tied(tied, 5));
        assert_eq!(Tally::count(&votes).elected(), None);
    }

    #[proptest]
    fn the_plurality_is_elected(a: Move, #[filter(#a != #b)] b: Move) {
        let votes = ballots(&[(b, 1), (a, 3)]);
        assert_eq!(Tally::count(&votes), Tally::Elected(a, 3));
    }

    #[proptest]
    fn a_move_is_elected_iff_its_count_is_unique_and_highest(
        #[strategy(vec(any::<(Move, u8)>(), 0..6))] groups: Vec<(Move, u8)>,
    ) {
        let mut counts = HashMap::<Move, usize>::new();
        for (m, n) in groups {
            *counts.entry(m).or_default() += n as usize % 4;
        }

        let counts: Vec<_> = counts.into_iter().filter(|&(_, n)| n > 0).collect();
        let votes = ballots(&counts);
        let max = counts.iter().map(|&(_, n)| n).max();
        let leaders: Vec<_> = counts.iter().filter(|&&(_, n)| Some(n) == max).collect();

        match (Tally::count(&votes), leaders.as_slice()) {
            (Tally::Empty, []) => {}
            (Tally::Elected(m, n), [&(l, c)]) => assert_eq!((m, n), (l, c)),
            (Tally::Tied(ms, n), ls) if ls.len() > 1 => {
                assert_eq!(ms.len(), ls.len());
                assert!(ls.iter().all(|&&(l, c)| c == n && ms.contains(&l)));
            }
            (t, ls) => panic!("unexpected {t:?} for leaders {ls:?}"),
        }
    }
}
