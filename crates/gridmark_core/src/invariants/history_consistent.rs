//! History consistency invariant: history length matches marked cells.

use super::super::GameState;
use super::Invariant;

/// Invariant: every marked cell has exactly one move in the history, and
/// the last move recorded is the last cell marked.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        game.history().len() == game.board().marked_count()
            && game.history().last().map(|m| m.cell) == game.last_move()
    }

    fn description() -> &'static str {
        "History length matches number of marked cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, PlayerId, Players, Square, new_game};

    fn fresh() -> GameState {
        new_game(3, Players::default(), PlayerId::from("x"), None).unwrap()
    }

    #[test]
    fn test_empty_game_holds() {
        assert!(HistoryConsistentInvariant::holds(&fresh()));
    }

    #[test]
    fn test_moves_hold() {
        let mut game = fresh();
        game.apply_move(Cell::new(2, 2)).unwrap();
        game.apply_move(Cell::new(0, 0)).unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_unrecorded_mark_violates() {
        let mut game = fresh();
        game.apply_move(Cell::new(2, 2)).unwrap();
        game.board
            .set_unchecked(Cell::new(0, 1), Square::Occupied(PlayerId::from("o")));
        assert!(!HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_stale_last_move_violates() {
        let mut game = fresh();
        game.apply_move(Cell::new(2, 2)).unwrap();
        game.last_move = Some(Cell::new(0, 0));
        assert!(!HistoryConsistentInvariant::holds(&game));
    }
}
