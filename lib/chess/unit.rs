use crate::chess::{Role, Square, Team};
use derive_more::Display;

/// Identifies a [`Unit`] on the [`Board`][`crate::chess::Board`] that placed it.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[display(fmt = "#{}", _0)]
pub struct UnitId(pub(super) usize);

/// A piece of a [`Team`], standing on a [`Square`] until it is captured.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "{}{}", role, team)]
pub struct Unit {
    role: Role,
    team: Team,
    square: Option<Square>,
    moved: bool,
}

impl Unit {
    pub(super) fn new(role: Role, team: Team, square: Square) -> Self {
        Unit {
            role,
            team,
            square: Some(square),
            moved: false,
        }
    }

    /// This unit's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.role
    }

    /// This unit's [`Team`].
    #[inline(always)]
    pub fn team(&self) -> Team {
        self.team
    }

    /// The [`Square`] this unit stands on, or `None` if it was captured.
    #[inline(always)]
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    /// Whether this unit was captured.
    #[inline(always)]
    pub fn is_captured(&self) -> bool {
        self.square.is_none()
    }

    /// Whether this unit has ever moved.
    #[inline(always)]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    pub(super) fn advance_to(&mut self, whither: Square) {
        debug_assert!(!self.is_captured());
        self.square = Some(whither);
        self.moved = true;
    }

    pub(super) fn capture(&mut self) {
        self.square = None;
    }
}
