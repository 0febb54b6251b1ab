use crate::chess::{File, Rank, Role, Square, Team, Unit, UnitId};
use derive_more::Error;
use std::fmt::{self, Write};

/// The reason why a [`Unit`] could not be moved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub struct IllegalMove {
    pub role: Role,
    pub whence: Option<Square>,
    pub whither: Square,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.whence {
            Some(whence) => write!(f, "illegal {} move {} {}", self.role, whence, self.whither),
            None => write!(f, "illegal move of captured {} to {}", self.role, self.whither),
        }
    }
}

/// A rectangular grid of [`Square`]s and the [`Unit`]s placed on it.
///
/// The board is the sole owner of unit state, units can only change squares
/// through [`Board::move_to`] once they are placed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    files: u8,
    ranks: u8,
    grid: Vec<Option<UnitId>>,
    units: Vec<Unit>,
}

/// The standard 8x8 setup, with team `1` on ranks `A` and `B`.
impl Default for Board {
    fn default() -> Self {
        let mut board = Board::new(8, 8);
        let back = [(Team::One, Rank::new(0)), (Team::Two, Rank::new(7))];
        let front = [(Team::One, Rank::new(1)), (Team::Two, Rank::new(6))];

        for (team, rank) in back {
            for (f, role) in (1..).zip(Role::BACK_RANK) {
                board.place(role, team, Square::new(File::new(f), rank));
            }
        }

        for (team, rank) in front {
            for f in 1..=8 {
                board.place(Role::Pawn, team, Square::new(File::new(f), rank));
            }
        }

        board
    }
}

impl Board {
    /// An empty board with the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or if there are more ranks than letters.
    pub fn new(files: u8, ranks: u8) -> Self {
        assert!(files > 0 && ranks > 0, "the board cannot be empty");
        assert!(ranks <= Rank::MAX + 1, "ranks are lettered from A to Z");

        Board {
            files,
            ranks,
            grid: vec![None; files as usize * ranks as usize],
            units: Vec::new(),
        }
    }

    /// The number of files.
    #[inline(always)]
    pub fn files(&self) -> u8 {
        self.files
    }

    /// The number of ranks.
    #[inline(always)]
    pub fn ranks(&self) -> u8 {
        self.ranks
    }

    /// The [`Square`] at the given coordinates, or `None` if off the board.
    #[inline(always)]
    pub fn query_square(&self, file: File, rank: Rank) -> Option<Square> {
        (file.get() <= self.files && rank.index() < self.ranks).then(|| Square::new(file, rank))
    }

    /// Whether the [`Square`] lies on this board.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        self.query_square(sq.file(), sq.rank()).is_some()
    }

    /// All squares, row by row from rank `A`.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..self.ranks).flat_map(move |r| {
            (1..=self.files).map(move |f| Square::new(File::new(f), Rank::new(r)))
        })
    }

    /// The square `d` files and ranks away from `sq`, if on the board.
    #[inline(always)]
    pub fn step(&self, sq: Square, d: (i8, i8)) -> Option<Square> {
        let next = sq.offset(d)?;
        self.query_square(next.file(), next.rank())
    }

    /// The neighbor towards the first file.
    pub fn left(&self, sq: Square) -> Option<Square> {
        self.step(sq, (-1, 0))
    }

    /// The neighbor towards the last file.
    pub fn right(&self, sq: Square) -> Option<Square> {
        self.step(sq, (1, 0))
    }

    /// The neighbor towards the last rank.
    pub fn up(&self, sq: Square) -> Option<Square> {
        self.step(sq, (0, 1))
    }

    /// The neighbor towards rank `A`.
    pub fn down(&self, sq: Square) -> Option<Square> {
        self.step(sq, (0, -1))
    }

    fn slot(&self, sq: Square) -> usize {
        assert!(self.contains(sq), "square {sq} is off the board");
        sq.rank().index() as usize * self.files as usize + sq.file().get() as usize - 1
    }

    /// The [`Unit`] behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this board.
    #[inline(always)]
    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.0]
    }

    /// All units ever placed, including captured ones.
    pub fn units(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.units.iter().enumerate().map(|(i, u)| (UnitId(i), u))
    }

    /// The id of the unit on `sq`, if any.
    pub fn occupant(&self, sq: Square) -> Option<UnitId> {
        if self.contains(sq) {
            self.grid[self.slot(sq)]
        } else {
            None
        }
    }

    /// The unit on `sq`, if any.
    pub fn unit_on(&self, sq: Square) -> Option<&Unit> {
        self.occupant(sq).map(|id| self.unit(id))
    }

    /// Sets up a new [`Unit`] on an empty square.
    ///
    /// # Panics
    ///
    /// Panics if `sq` is off the board or already occupied.
    pub fn place(&mut self, role: Role, team: Team, sq: Square) -> UnitId {
        let slot = self.slot(sq);
        assert!(self.grid[slot].is_none(), "square {sq} is already occupied");

        let id = UnitId(self.units.len());
        self.units.push(Unit::new(role, team, sq));
        self.grid[slot] = Some(id);
        id
    }

    /// Moves a [`Unit`], capturing whatever stands on the destination.
    ///
    /// Returns the square the unit moved from.
    pub fn move_to(&mut self, id: UnitId, whither: Square) -> Result<Square, IllegalMove> {
        let unit = self.unit(id);

        let illegal = IllegalMove {
            role: unit.role(),
            whence: unit.square(),
            whither,
        };

        let whence = unit.square().ok_or(illegal)?;
        if !self.possible_destinations(id).contains(&whither) {
            return Err(illegal);
        }

        let (from, to) = (self.slot(whence), self.slot(whither));
        if let Some(captured) = self.grid[to].take() {
            self.units[captured.0].capture();
        }

        self.grid[from] = None;
        self.grid[to] = Some(id);
        self.units[id.0].advance_to(whither);

        Ok(whence)
    }

    /// The wire representation of this board.
    ///
    /// Rows go from rank `A` upward separated by `/`, cells go from the
    /// first file separated by `,`, empty cells are `~`.
    pub fn snapshot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.ranks {
            if r > 0 {
                f.write_char('/')?;
            }

            for file in 1..=self.files {
                if file > 1 {
                    f.write_char(',')?;
                }

                let sq = Square::new(File::new(file), Rank::new(r));
                match self.unit_on(sq) {
                    Some(unit) => fmt::Display::fmt(unit, f)?,
                    None => f.write_char('~')?,
                }
            }
        }

        Ok(())
    }
}
