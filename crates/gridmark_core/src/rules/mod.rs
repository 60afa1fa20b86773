//! Game rules for grid marking games.
//!
//! Pure functions evaluating a board. Rules are kept apart from board
//! storage so the state machine, the invariants and the tests can all
//! share them.

pub mod stalemate;
pub mod win;

pub use stalemate::is_stalemate;
pub use win::{Diagonal, Line, check_winner, completed_lines};

use super::{Board, PlayerId, Players};
use serde::Serialize;
use tracing::instrument;

/// Result of evaluating a board after a move.
///
/// `winner` and `stalemate` are never both set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Evaluation {
    /// The winning player, if any.
    pub winner: Option<PlayerId>,
    /// Lines completed by the winner, for highlighting.
    pub lines: Vec<Line>,
    /// True when the board is full with no winner.
    pub stalemate: bool,
}

/// Evaluates the board for every player in priority order, then checks for
/// stalemate. A winner always takes precedence over a full board.
#[instrument(skip_all, fields(size = %board.size()))]
pub fn evaluate(board: &Board, players: &Players) -> Evaluation {
    match check_winner(board, players) {
        Some((winner, lines)) => Evaluation {
            winner: Some(winner),
            lines,
            stalemate: false,
        },
        None => Evaluation {
            winner: None,
            lines: Vec::new(),
            stalemate: is_stalemate(board, players),
        },
    }
}
