//! Computer move selection.
//!
//! The computer does not search. It plays a fixed positional pattern keyed
//! on where the last move landed relative to the board edges, and falls
//! back to a uniformly random open cell when the pattern points at a
//! marked cell.
//!
//! | last move           | candidate       |
//! |---------------------|-----------------|
//! | none                | center          |
//! | interior            | `(row, col+1)`  |
//! | top edge            | `(row, col+1)`  |
//! | bottom edge         | `(row, col-1)`  |
//! | left edge           | `(row-1, col)`  |
//! | right edge          | `(row+1, col)`  |
//! | top-left corner     | `(row, col+1)`  |
//! | top-right corner    | `(row+1, col)`  |
//! | bottom-left corner  | `(row-1, col)`  |
//! | bottom-right corner | `(row, col-1)`  |

use super::Board;
use super::types::{BoardSize, Cell};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// A way of choosing the computer's next cell.
pub trait Strategy {
    /// Picks a cell to mark, or `None` if the board has no open cell.
    fn choose_move(&mut self, board: &Board, last_move: Option<Cell>) -> Option<Cell>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}

/// Which board edges a cell touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeAdjacency {
    /// Row 0.
    pub top: bool,
    /// Last row.
    pub bottom: bool,
    /// Column 0.
    pub left: bool,
    /// Last column.
    pub right: bool,
}

impl EdgeAdjacency {
    /// Classifies `cell` on a board of `size`.
    pub fn of(cell: Cell, size: BoardSize) -> Self {
        let last = size.get() - 1;
        Self {
            top: cell.row == 0,
            bottom: cell.row == last,
            left: cell.col == 0,
            right: cell.col == last,
        }
    }

    /// Number of edges touched: 0 inside, 1 on a side, 2 in a corner.
    pub fn count(self) -> usize {
        [self.top, self.bottom, self.left, self.right]
            .into_iter()
            .filter(|&edge| edge)
            .count()
    }

    /// Step from the last move to the candidate, as `(rows, cols)`.
    ///
    /// Corner arms come first so they override the single-edge arms.
    fn drift(self) -> (isize, isize) {
        match self {
            EdgeAdjacency { top: true, left: true, .. } => (0, 1),
            EdgeAdjacency { top: true, right: true, .. } => (1, 0),
            EdgeAdjacency { bottom: true, left: true, .. } => (-1, 0),
            EdgeAdjacency { bottom: true, right: true, .. } => (0, -1),
            EdgeAdjacency { top: true, .. } => (0, 1),
            EdgeAdjacency { bottom: true, .. } => (0, -1),
            EdgeAdjacency { left: true, .. } => (-1, 0),
            EdgeAdjacency { right: true, .. } => (1, 0),
            _ => (0, 1),
        }
    }
}

/// The cell the pattern points at, or `None` if that falls off the board.
///
/// Does not look at marks; see [`EdgeDrift`] for the fallback.
#[instrument]
pub fn candidate(size: BoardSize, last_move: Option<Cell>) -> Option<Cell> {
    let Some(last) = last_move else {
        return Some(size.center());
    };
    let (dr, dc) = EdgeAdjacency::of(last, size).drift();
    size.cell_at(last.row as isize + dr, last.col as isize + dc)
}

/// The computer's positional strategy.
///
/// Holds the random source used when the pattern's candidate is taken.
#[derive(Debug, Clone)]
pub struct EdgeDrift<R> {
    rng: R,
}

impl<R: Rng> EdgeDrift<R> {
    /// Creates the strategy around a random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Strategy for EdgeDrift<R> {
    #[instrument(skip(self, board), fields(size = %board.size()))]
    fn choose_move(&mut self, board: &Board, last_move: Option<Cell>) -> Option<Cell> {
        if let Some(cell) = candidate(board.size(), last_move)
            && !board.is_marked(cell)
        {
            debug!(%cell, "Pattern candidate is open");
            return Some(cell);
        }

        let open = board.available_cells();
        let cell = open.choose(&mut self.rng).copied();
        debug!(cell = ?cell, open = open.len(), "Falling back to a random open cell");
        cell
    }

    fn name(&self) -> &str {
        "edge drift"
    }
}
