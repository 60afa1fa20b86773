//! Stalemate detection.

use super::super::{Board, Players};
use super::win::check_winner;
use tracing::instrument;

/// A full board on which no player holds a complete line.
#[instrument(skip_all)]
pub fn is_stalemate(board: &Board, players: &Players) -> bool {
    board.is_full() && check_winner(board, players).is_none()
}
