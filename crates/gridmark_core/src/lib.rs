//! Pure game logic for N×N grid marking games.
//!
//! Generalized tic-tac-toe on any odd board size of at least 3, with a
//! fixed positional computer opponent.
//!
//! # Architecture
//!
//! - **Board**: integer-keyed grid of exclusive, permanent marks
//! - **Rules**: win detection over rows, columns and diagonals, plus stalemate
//! - **Game**: single owned [`GameState`] driven through [`GameState::apply_move`]
//! - **Heuristic**: the [`EdgeDrift`] strategy used by the computer player
//! - **Status**: pure projection of a game into display-ready [`Status`]
//!
//! # Example
//!
//! ```
//! use gridmark_core::{new_game, Cell, Line, Players, PlayerId, Status};
//!
//! let players = Players::new("a", "b").unwrap();
//! let mut game = new_game(3, players, PlayerId::from("a"), None).unwrap();
//!
//! for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
//!     game.apply_move(Cell::new(row, col)).unwrap();
//! }
//!
//! assert_eq!(game.status(), Status::Won(PlayerId::from("a")));
//! assert_eq!(game.winning_line(), Some(Line::Row(0)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod error;
mod game;
mod heuristic;
mod invariants;
mod rules;
mod status;
mod types;

pub use action::{Move, MoveError};
pub use board::Board;
pub use contracts::{CellIsOpen, Contract, GameIsLive, LegalMove, MoveContract, PlayersTurn};
pub use error::ConfigError;
pub use game::{GameState, Phase, new_game};
pub use heuristic::{EdgeAdjacency, EdgeDrift, Strategy, candidate};
pub use invariants::{
    AlternatingTurnInvariant, GameInvariants, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, MonotonicBoardInvariant,
};
pub use rules::{Diagonal, Evaluation, Line, check_winner, completed_lines, evaluate, is_stalemate};
pub use status::{Status, current_status};
pub use types::{BoardSize, Cell, PlayerId, Players, Square};
