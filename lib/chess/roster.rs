use crate::chess::{Board, Role, Team, UnitId};
use std::collections::HashMap;

/// Each team's units grouped by [`Role`], surveyed once at setup.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Roster {
    teams: [HashMap<Role, Vec<UnitId>>; 2],
}

impl Roster {
    /// Surveys every unit on the board.
    pub fn new(board: &Board) -> Self {
        let mut roster = Roster::default();

        for (id, unit) in board.units() {
            roster.teams[unit.team().index()]
                .entry(unit.role())
                .or_default()
                .push(id);
        }

        roster
    }

    /// The team's units of the given [`Role`].
    pub fn units(&self, team: Team, role: Role) -> &[UnitId] {
        self.teams[team.index()]
            .get(&role)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Whether the team still has a king standing on the board.
    pub fn has_king(&self, board: &Board, team: Team) -> bool {
        self.units(team, Role::King)
            .iter()
            .any(|&id| !board.unit(id).is_captured())
    }
}
