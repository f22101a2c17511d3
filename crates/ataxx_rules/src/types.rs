//! Core domain types for Ataxx.

use super::action::GameError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 7;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Black (moves first).
    Black,
    /// White.
    White,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-letter symbol used in board renderings.
    pub fn symbol(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// Cell holding a piece of the given player.
    Owned(Player),
}

impl Cell {
    /// Returns the owner of the piece in this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Owned(player) => Some(player),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Checks if the cell holds a piece of `player`.
    pub fn is_owned_by(self, player: Player) -> bool {
        self == Cell::Owned(player)
    }
}

/// A validated board coordinate, both components in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Creates a coordinate, failing with [`GameError::OutOfBounds`] outside the grid.
    #[instrument]
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Row index (0 is the top row).
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column index (0 is the left column).
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Chebyshev distance: the larger of the row and column differences.
    pub fn chebyshev(self, other: Coord) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr.max(dc) as usize
    }

    /// In-bounds cells within Chebyshev distance `radius`, excluding `self`.
    ///
    /// Cells are yielded in row-major order.
    pub fn within(self, radius: usize) -> impl Iterator<Item = Coord> {
        let r = radius as isize;
        let (row, col) = (self.row as isize, self.col as isize);
        (row - r..=row + r)
            .flat_map(move |i| (col - r..=col + r).map(move |j| (i, j)))
            .filter(move |&(i, j)| (i, j) != (row, col))
            .filter_map(|(i, j)| {
                let in_range = |v: isize| (0..BOARD_SIZE as isize).contains(&v);
                (in_range(i) && in_range(j)).then(|| Coord {
                    row: i as u8,
                    col: j as u8,
                })
            })
    }

    /// Every coordinate of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Coord { row, col }))
    }

    /// Bit index in the stride-8 save masks.
    pub fn bit(self) -> u32 {
        (self.row as u32) << 3 | self.col as u32
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// 7x7 Ataxx board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells indexed `[row][col]`.
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the starting position: Black on (0,0) and (6,6), White on (0,6) and (6,0).
    #[instrument]
    pub fn starting() -> Self {
        let last = BOARD_SIZE - 1;
        let mut board = Self::new();
        board.cells[0][0] = Cell::Owned(Player::Black);
        board.cells[last][last] = Cell::Owned(Player::Black);
        board.cells[0][last] = Cell::Owned(Player::White);
        board.cells[last][0] = Cell::Owned(Player::White);
        board
    }

    /// Gets the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        let coord = Coord::new(row, col)?;
        Ok(self.at(coord))
    }

    /// Sets the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GameError> {
        let coord = Coord::new(row, col)?;
        self.put(coord, cell);
        Ok(())
    }

    /// Gets the cell at a validated coordinate.
    pub fn at(&self, coord: Coord) -> Cell {
        self.cells[coord.row()][coord.col()]
    }

    /// Sets the cell at a validated coordinate.
    pub fn put(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row()][coord.col()] = cell;
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        Coord::all().map(move |coord| (coord, self.at(coord)))
    }

    /// Number of pieces owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells().filter(|(_, cell)| cell.is_owned_by(player)).count()
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells().filter(|(_, cell)| !cell.is_empty()).count()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.owner().map_or('.', Player::symbol))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
