//! Win detection over rows, columns and diagonals.

use super::super::{Board, BoardSize, Cell, PlayerId, Players};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// One of the two diagonals of a square board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Diagonal {
    /// Top-left to bottom-right.
    Primary,
    /// Top-right to bottom-left.
    Secondary,
}

/// A full-length line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Line {
    /// A row, by index.
    #[display("row {}", _0)]
    Row(usize),
    /// A column, by index.
    #[display("column {}", _0)]
    Column(usize),
    /// A diagonal.
    #[display("{} diagonal", _0)]
    Diagonal(Diagonal),
}

impl Line {
    /// Cells covered by this line, in ascending row order (column order for rows).
    pub fn cells(self, size: BoardSize) -> Vec<Cell> {
        let n = size.get();
        (0..n)
            .map(|i| match self {
                Line::Row(row) => Cell::new(row, i),
                Line::Column(col) => Cell::new(i, col),
                Line::Diagonal(Diagonal::Primary) => Cell::new(i, i),
                Line::Diagonal(Diagonal::Secondary) => Cell::new(i, n - 1 - i),
            })
            .collect()
    }
}

/// Builds the player's occupancy matrix, indexed `[row][col]`.
fn occupancy(board: &Board, player: &PlayerId) -> Vec<Vec<bool>> {
    let n = board.size().get();
    let mut grid = vec![vec![false; n]; n];
    for (cell, square) in board.cells() {
        grid[cell.row][cell.col] = square.owner() == Some(player);
    }
    grid
}

/// Every line `player` has completed.
///
/// Rows come first, then columns, then the primary and secondary
/// diagonals, each group in ascending index order.
#[instrument(skip(board), fields(size = %board.size()))]
pub fn completed_lines(board: &Board, player: &PlayerId) -> Vec<Line> {
    let grid = occupancy(board, player);
    let n = grid.len();

    let rows = (0..n)
        .filter(|&row| grid[row].iter().all(|&owned| owned))
        .map(Line::Row);
    let columns = (0..n)
        .filter(|&col| grid.iter().all(|row| row[col]))
        .map(Line::Column);
    let diagonals = Diagonal::iter()
        .map(Line::Diagonal)
        .filter(|line| line.cells(board.size()).iter().all(|c| grid[c.row][c.col]));

    rows.chain(columns).chain(diagonals).collect()
}

/// Checks players in priority order and returns the first one with a
/// completed line, together with every line that player completed.
///
/// If both players somehow hold a full line, the earlier one in `players`
/// wins and the other is not examined.
#[instrument(skip(board, players), fields(size = %board.size()))]
pub fn check_winner(board: &Board, players: &Players) -> Option<(PlayerId, Vec<Line>)> {
    for player in players.iter() {
        let lines = completed_lines(board, player);
        if !lines.is_empty() {
            debug!(%player, ?lines, "Winning line found");
            return Some((player.clone(), lines));
        }
    }
    None
}
