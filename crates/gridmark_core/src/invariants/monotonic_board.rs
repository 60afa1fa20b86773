//! Monotonic board invariant: marks never change once set.

use super::super::{Board, GameState};
use super::Invariant;

/// Invariant: marks are permanent and exclusive.
///
/// Replaying the move history onto an empty board must succeed move by move
/// (no cell marked twice) and reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(game: &GameState) -> bool {
        let mut reconstructed = Board::new(game.board_size());

        for mov in game.history() {
            if reconstructed.mark(mov.cell, &mov.player).is_err() {
                return false;
            }
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board marks are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Move, PlayerId, Players, Square, new_game};

    fn fresh() -> GameState {
        new_game(3, Players::default(), PlayerId::from("x"), None).unwrap()
    }

    #[test]
    fn test_empty_game_holds() {
        assert!(MonotonicBoardInvariant::holds(&fresh()));
    }

    #[test]
    fn test_multiple_moves_hold() {
        let mut game = fresh();
        for cell in [Cell::new(0, 0), Cell::new(1, 1), Cell::new(0, 2), Cell::new(2, 0)] {
            game.apply_move(cell).unwrap();
        }
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_overwritten_mark_violates() {
        let mut game = fresh();
        game.apply_move(Cell::new(1, 1)).unwrap();
        game.board
            .set_unchecked(Cell::new(1, 1), Square::Occupied(PlayerId::from("o")));
        assert!(!MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_duplicate_history_violates() {
        let mut game = fresh();
        game.apply_move(Cell::new(1, 1)).unwrap();
        game.history.push(Move::new(PlayerId::from("o"), Cell::new(1, 1)));
        assert!(!MonotonicBoardInvariant::holds(&game));
    }
}
