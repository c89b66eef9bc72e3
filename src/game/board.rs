//! Board grid and coordinates.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

use crate::error::BoardError;
use crate::game::{Cell, PlayerId, PlayerIds, Seat};

/// Smallest board that still has two distinct home cells.
pub const MIN_DIM: usize = 2;

/// A cell position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
pub struct Coord {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Get orthogonal neighbours (up, down, left, right) on a `dim × dim` grid.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, dim: usize) -> ([Coord; 4], usize) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0;

        if self.row > 0 {
            result[count] = Coord::new(self.row - 1, self.col);
            count += 1;
        }
        if self.row + 1 < dim {
            result[count] = Coord::new(self.row + 1, self.col);
            count += 1;
        }
        if self.col > 0 {
            result[count] = Coord::new(self.row, self.col - 1);
            count += 1;
        }
        if self.col + 1 < dim {
            result[count] = Coord::new(self.row, self.col + 1);
            count += 1;
        }

        (result, count)
    }

    /// Whether `other` shares an edge with this coordinate.
    #[must_use]
    pub const fn is_adjacent_to(&self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// A `dim × dim` grid of cells.
///
/// Seat A's home cell is the top-left corner, seat B's the bottom-right one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Side length of the grid.
    dim: usize,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with every cell neutral.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DimensionTooSmall`] if `dim` is below [`MIN_DIM`].
    pub fn new(dim: usize) -> Result<Self, BoardError> {
        if dim < MIN_DIM {
            return Err(BoardError::DimensionTooSmall(dim));
        }

        Ok(Self {
            dim,
            cells: vec![Cell::neutral(); dim * dim],
        })
    }

    /// Create a board where every cell holds `soldiers`.
    ///
    /// The first half of the cells in row-major order goes to seat A and the
    /// rest to seat B, so each home cell lies inside its owner's region. With
    /// zero soldiers the board stays empty.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DimensionTooSmall`] if `dim` is below [`MIN_DIM`].
    pub fn populated(dim: usize, ids: PlayerIds, soldiers: u32) -> Result<Self, BoardError> {
        let mut board = Self::new(dim)?;
        if soldiers == 0 {
            return Ok(board);
        }

        let half = board.cells.len() / 2;
        for (idx, cell) in board.cells.iter_mut().enumerate() {
            let seat = if idx < half { Seat::A } else { Seat::B };
            *cell = Cell::new(ids.id(seat), soldiers).unwrap_or_default();
        }
        Ok(board)
    }

    /// Place `soldiers` on both home cells.
    ///
    /// With zero soldiers the home cells are left neutral.
    pub fn populate_home_bases(&mut self, ids: PlayerIds, soldiers: u32) {
        for seat in Seat::ALL {
            let home = self.home(seat);
            let idx = self.index(home);
            self.cells[idx] = Cell::new(ids.id(seat), soldiers).unwrap_or_default();
        }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Home coordinate of `seat`.
    #[must_use]
    pub const fn home(&self, seat: Seat) -> Coord {
        match seat {
            Seat::A => Coord::new(0, 0),
            Seat::B => Coord::new(self.dim - 1, self.dim - 1),
        }
    }

    /// Home cell of `seat`.
    #[must_use]
    pub fn home_cell(&self, seat: Seat) -> &Cell {
        &self.cells[self.index(self.home(seat))]
    }

    /// Check if a coordinate is within the board bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.dim && coord.col < self.dim
    }

    /// Index of an in-bounds coordinate in the row-major cell vector.
    const fn index(&self, coord: Coord) -> usize {
        coord.row * self.dim + coord.col
    }

    /// Bounds-checked coordinate, as an error.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `coord` is off the grid.
    pub const fn check_bounds(&self, coord: Coord) -> Result<Coord, BoardError> {
        if self.in_bounds(coord) {
            Ok(coord)
        } else {
            Err(BoardError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                dim: self.dim,
            })
        }
    }

    /// Get the cell at `coord`.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.in_bounds(coord).then(|| &self.cells[self.index(coord)])
    }

    /// Get the cell at `(row, col)`.
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cell(Coord::new(row, col))
    }

    /// Get a mutable reference to the cell at `coord`.
    #[must_use]
    pub fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        if self.in_bounds(coord) {
            let idx = self.index(coord);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Replace the cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `coord` is off the grid.
    pub fn set_cell(&mut self, coord: Coord, cell: Cell) -> Result<(), BoardError> {
        let idx = self.index(self.check_bounds(coord)?);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Iterate over all coordinates and cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let dim = self.dim;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (Coord::new(idx / dim, idx % dim), cell))
    }

    /// Iterate over the cells controlled by `player_id`.
    pub fn cells_controlled_by(&self, player_id: PlayerId) -> impl Iterator<Item = (Coord, &Cell)> {
        self.cells()
            .filter(move |(_, cell)| cell.is_controlled_by(player_id))
    }

    /// In-bounds orthogonal neighbours of `coord`.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        let (adjacent, count) = coord.adjacent(self.dim);
        adjacent.into_iter().take(count)
    }

    /// Number of cells controlled by `player_id`; this is the reinforcement quota.
    #[must_use]
    pub fn player_cell_count(&self, player_id: PlayerId) -> u32 {
        let count = self.cells_controlled_by(player_id).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Sum of soldiers across every cell controlled by `player_id`.
    #[must_use]
    pub fn total_soldiers(&self, player_id: PlayerId) -> u64 {
        self.cells_controlled_by(player_id)
            .map(|(_, cell)| u64::from(cell.num_soldiers()))
            .sum()
    }

    /// Whether no cell is controlled by anyone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_neutral)
    }
}

/// Boards serialize as `{ "dim": n, "configuration": [[cell; n]; n] }`, the
/// shape handed to scripted players.
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let configuration: Vec<&[Cell]> = self.cells.chunks(self.dim).collect();
        let mut state = serializer.serialize_struct("Board", 2)?;
        state.serialize_field("dim", &self.dim)?;
        state.serialize_field("configuration", &configuration)?;
        state.end()
    }
}
