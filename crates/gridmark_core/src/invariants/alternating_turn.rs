//! Alternating turn invariant: the two players take turns.

use super::super::GameState;
use super::Invariant;

/// Invariant: players alternate turns.
///
/// The first move belongs to the configured first player, no player moves
/// twice in a row, and while the game is live the player to move is the
/// opponent of the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let history = game.history();

        let Some(first) = history.first() else {
            return game.current_player() == game.first_player();
        };

        if first.player != *game.first_player() {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].player == pair[1].player) {
            return false;
        }

        if game.is_terminal() {
            return true;
        }

        history
            .last()
            .is_some_and(|last| game.players().other(&last.player) == game.current_player())
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the first player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, PlayerId, Players, new_game};

    fn fresh(first: &str) -> GameState {
        new_game(3, Players::default(), PlayerId::from(first), None).unwrap()
    }

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&fresh("x")));
        assert!(AlternatingTurnInvariant::holds(&fresh("o")));
    }

    #[test]
    fn test_second_player_starting_holds() {
        let mut game = fresh("o");
        game.apply_move(Cell::new(0, 0)).unwrap();
        game.apply_move(Cell::new(1, 1)).unwrap();
        assert!(AlternatingTurnInvariant::holds(&game));
        assert_eq!(game.current_player(), &PlayerId::from("o"));
    }

    #[test]
    fn test_skipped_turn_violates() {
        let mut game = fresh("x");
        game.apply_move(Cell::new(0, 0)).unwrap();
        game.current_player = PlayerId::from("x");
        assert!(!AlternatingTurnInvariant::holds(&game));
    }
}
