//! Board storage: one mark per cell, keyed by integer coordinates.

use super::action::MoveError;
use super::types::{BoardSize, Cell, PlayerId, Square};
use serde::Serialize;
use std::fmt;
use tracing::{instrument, trace};

/// Square board of exclusive, permanent marks.
///
/// Cells are stored in row-major order. The only way to change a cell is
/// [`Board::mark`], which refuses to touch a cell that is already marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: BoardSize,
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size.cell_count()],
        }
    }

    /// Returns the side length.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.size
            .contains(cell)
            .then(|| cell.row * self.size.get() + cell.col)
    }

    /// Gets the square at `cell`, or `None` off the board.
    pub fn get(&self, cell: Cell) -> Option<&Square> {
        self.index(cell).map(|i| &self.squares[i])
    }

    /// Returns the player who marked `cell`.
    pub fn owner(&self, cell: Cell) -> Option<&PlayerId> {
        self.get(cell).and_then(Square::owner)
    }

    /// Returns true if `cell` carries a mark. Off-board cells are unmarked.
    pub fn is_marked(&self, cell: Cell) -> bool {
        self.owner(cell).is_some()
    }

    /// Records a mark for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] for a cell off the board and
    /// [`MoveError::CellMarked`] if the cell already carries a mark. The board
    /// is unchanged in both cases.
    #[instrument(skip(self), fields(size = %self.size))]
    pub fn mark(&mut self, cell: Cell, player: &PlayerId) -> Result<(), MoveError> {
        let index = self.index(cell).ok_or(MoveError::OutOfBounds(cell))?;
        let square = &mut self.squares[index];
        if !square.is_empty() {
            return Err(MoveError::CellMarked(cell));
        }
        *square = Square::Occupied(player.clone());
        trace!(%cell, %player, "Cell marked");
        Ok(())
    }

    /// Iterates every cell with its square, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &Square)> {
        let n = self.size.get();
        self.squares
            .iter()
            .enumerate()
            .map(move |(i, square)| (Cell::new(i / n, i % n), square))
    }

    /// All unmarked cells, row-major.
    pub fn available_cells(&self) -> Vec<Cell> {
        self.cells()
            .filter(|(_, square)| square.is_empty())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Number of marked cells.
    pub fn marked_count(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_empty()).count()
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| !s.is_empty())
    }

    /// Overwrites a square without any checks.
    #[cfg(test)]
    pub(crate) fn set_unchecked(&mut self, cell: Cell, square: Square) {
        if let Some(index) = self.index(cell) {
            self.squares[index] = square;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size.get();
        for (row, squares) in self.squares.chunks(n).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, square) in squares.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                match square {
                    Square::Empty => write!(f, ".")?,
                    Square::Occupied(player) => write!(f, "{}", player)?,
                }
            }
        }
        Ok(())
    }
}
