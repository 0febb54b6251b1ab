use crate::chess::{Board, Move, Role, Square, Team, Unit, UnitId};
use std::collections::BTreeSet;

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

#[rustfmt::skip]
const SURROUNDING: [(i8, i8); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1),
];

#[rustfmt::skip]
const KNIGHT: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

impl Board {
    /// The squares the [`Unit`] could move to right now.
    ///
    /// Check is not a concept here, kings may walk into attacked squares.
    /// Captured units have nowhere to go.
    pub fn possible_destinations(&self, id: UnitId) -> BTreeSet<Square> {
        let unit = self.unit(id);
        let Some(whence) = unit.square() else {
            return BTreeSet::new();
        };

        match unit.role() {
            Role::King => self.leaps(unit.team(), whence, &SURROUNDING),
            Role::Knight => self.leaps(unit.team(), whence, &KNIGHT),
            Role::Rook => self.rays(unit.team(), whence, &ORTHOGONAL),
            Role::Bishop => self.rays(unit.team(), whence, &DIAGONAL),
            Role::Queen => self.rays(unit.team(), whence, &SURROUNDING),
            Role::Pawn => self.pawn(unit, whence),
        }
    }

    /// Every move currently available to the [`Team`].
    pub fn moves(&self, team: Team) -> impl Iterator<Item = Move> + '_ {
        self.units()
            .filter(move |(_, u)| u.team() == team)
            .filter_map(|(id, u)| Some((id, u.square()?)))
            .flat_map(move |(id, whence)| {
                self.possible_destinations(id)
                    .into_iter()
                    .map(move |whither| Move::new(whence, whither))
            })
    }

    /// Whether a unit of `team` may end its move on `sq`.
    fn admits(&self, team: Team, sq: Square) -> bool {
        self.unit_on(sq).map_or(true, |u| u.team() != team)
    }

    fn leaps(&self, team: Team, whence: Square, offsets: &[(i8, i8)]) -> BTreeSet<Square> {
        offsets
            .iter()
            .filter_map(|&d| self.step(whence, d))
            .filter(|&sq| self.admits(team, sq))
            .collect()
    }

    fn rays(&self, team: Team, whence: Square, directions: &[(i8, i8)]) -> BTreeSet<Square> {
        let mut destinations = BTreeSet::new();

        for &d in directions {
            let mut cursor = whence;
            while let Some(sq) = self.step(cursor, d) {
                match self.unit_on(sq) {
                    None => {
                        destinations.insert(sq);
                        cursor = sq;
                    }

                    Some(u) => {
                        if u.team() != team {
                            destinations.insert(sq);
                        }

                        break;
                    }
                }
            }
        }

        destinations
    }

    fn pawn(&self, unit: &Unit, whence: Square) -> BTreeSet<Square> {
        let team = unit.team();
        let forward = team.advance();
        let mut destinations = BTreeSet::new();

        if let Some(one) = self.step(whence, (0, forward)) {
            if self.unit_on(one).is_none() {
                destinations.insert(one);

                if !unit.has_moved() {
                    if let Some(two) = self.step(one, (0, forward)) {
                        if self.unit_on(two).is_none() {
                            destinations.insert(two);
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            if let Some(sq) = self.step(whence, (side, forward)) {
                if self.unit_on(sq).is_some_and(|u| u.team() != team) {
                    destinations.insert(sq);
                }
            }
        }

        destinations
    }
}
