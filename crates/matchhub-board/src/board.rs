//! Square game board and terminal-condition evaluation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::marker::Marker;

/// Board side length used when a game document does not specify one.
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// A single board cell.
///
/// The document representation matches the stored game format: an empty
/// cell is the integer `0`, an occupied cell is the marker string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// No marker placed yet.
    Empty,
    /// A placed marker.
    Taken(Marker),
}

impl Cell {
    /// Whether the cell holds a marker.
    pub fn is_taken(&self) -> bool {
        matches!(self, Self::Taken(_))
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_u8(0),
            Self::Taken(marker) => serializer.serialize_str(marker.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Empty(u8),
            Taken(Marker),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Empty(0) => Ok(Self::Empty),
            Repr::Empty(n) => Err(serde::de::Error::custom(format!("invalid cell value: {n}"))),
            Repr::Taken(marker) => Ok(Self::Taken(marker)),
        }
    }
}

/// An N×N game board.
///
/// Rows are indexed first: `board.get(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Create an empty square board of the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![vec![Cell::Empty; size]; size],
        }
    }

    /// The board's side length.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Whether the coordinates address a cell on this board.
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size()
    }

    /// The cell at the given coordinates, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Whether the cell at the given coordinates already holds a marker.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Taken(_)))
    }

    /// Place a marker. Returns `false` when the coordinates are out of
    /// bounds; occupancy is the caller's concern (cells are only ever
    /// written once by the game session service).
    pub fn set(&mut self, row: usize, col: usize, marker: Marker) -> bool {
        if !self.in_bounds(row, col) {
            return false;
        }
        self.cells[row][col] = Cell::Taken(marker);
        true
    }

    /// Whether the just-played move at `(row, col)` wins the game.
    ///
    /// Checks four lines: the full row, the full column, and both main
    /// diagonals of the square board. A line wins only if **every** cell
    /// along it equals `marker`. Off-main diagonals are never checked.
    pub fn winning_move(&self, row: usize, col: usize, marker: Marker) -> bool {
        let n = self.size();
        if n == 0 || !self.in_bounds(row, col) {
            return false;
        }

        let owned = |r: usize, c: usize| self.cells[r][c] == Cell::Taken(marker);

        if (0..n).all(|c| owned(row, c)) {
            return true;
        }
        if (0..n).all(|r| owned(r, col)) {
            return true;
        }
        if (0..n).all(|i| owned(i, i)) {
            return true;
        }
        (0..n).all(|i| owned(i, n - 1 - i))
    }

    /// Whether every cell holds a marker. Draw is declared only when a
    /// move produces no win and the board is full.
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_taken()))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}
