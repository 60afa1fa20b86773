//! First-class move events.
//!
//! A move is a player's intent to mark a cell. It can be validated against a
//! game before it is applied, and the applied moves form the game history.

use super::types::{Cell, PlayerId};
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A player marking a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, new)]
#[display("{} -> {}", player, cell)]
pub struct Move {
    /// The player making the move.
    pub player: PlayerId,
    /// The cell being marked.
    pub cell: Cell,
}

impl Move {
    /// Returns the player making this move.
    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    /// Returns the cell of this move.
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

/// Reasons a move is rejected.
///
/// A rejected move leaves the game untouched. Presentation layers are
/// expected to ignore these silently since stray clicks and input racing
/// the computer's turn reach them in normal play.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The cell lies outside the board.
    #[display("Cell {} is off the board", _0)]
    OutOfBounds(#[error(not(source))] Cell),

    /// The cell is already marked.
    #[display("Cell {} is already marked", _0)]
    CellMarked(#[error(not(source))] Cell),

    /// The game has already been won or ended in stalemate.
    #[display("Game is already over")]
    GameOver,

    /// The computer is choosing its move; human input is ignored.
    #[display("Waiting for the computer to move")]
    AwaitingComputer,

    /// No game has been started.
    #[display("No game in progress")]
    NotStarted,

    /// It is not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(#[error(not(source))] PlayerId),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_move_error_is_a_source_free_error() {
        let errors = [
            MoveError::OutOfBounds(Cell::new(9, 9)),
            MoveError::CellMarked(Cell::new(0, 0)),
            MoveError::WrongPlayer(PlayerId::from("o")),
            MoveError::InvariantViolation("board changed".to_string()),
            MoveError::GameOver,
        ];
        for err in errors {
            assert!(err.source().is_none());
            let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err.clone());
            assert_eq!(boxed.to_string(), err.to_string());
        }
    }

    #[test]
    fn test_move_display() {
        let mov = Move::new(PlayerId::from("x"), Cell::new(1, 2));
        assert_eq!(mov.to_string(), "x -> (1, 2)");
    }
}
