//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::game::GameState;
use super::invariants::{GameInvariants, InvariantSet};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the game has not been won or stalemated.
pub struct GameIsLive;

impl GameIsLive {
    /// Checks the precondition.
    #[instrument(skip_all)]
    pub fn check(_mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if game.is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the cell is on the board and unmarked.
pub struct CellIsOpen;

impl CellIsOpen {
    /// Checks the precondition.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if !game.board_size().contains(mov.cell) {
            Err(MoveError::OutOfBounds(mov.cell))
        } else if game.board().is_marked(mov.cell) {
            Err(MoveError::CellMarked(mov.cell))
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the precondition.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        if mov.player != *game.current_player() {
            Err(MoveError::WrongPlayer(mov.player.clone()))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the game is live, the cell is open and it is
/// the mover's turn.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), MoveError> {
        GameIsLive::check(mov, game)?;
        CellIsOpen::check(mov, game)?;
        PlayersTurn::check(mov, game)?;
        Ok(())
    }
}

/// Contract for move actions.
///
/// Postconditions: exactly one new mark, and every [`GameInvariants`]
/// member still holds.
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(game: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        let added = after.board().marked_count() as isize - before.board().marked_count() as isize;
        if added != 1 {
            warn!(added, "Move did not add exactly one mark");
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: expected one new mark, found {}",
                added
            )));
        }

        GameInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
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
    fn test_precondition_open_cell() {
        let game = fresh();
        let action = Move::new(PlayerId::from("x"), Cell::new(1, 1));
        assert!(MoveContract::pre(&game, &action).is_ok());
    }

    #[test]
    fn test_precondition_marked_cell() {
        let mut game = fresh();
        game.apply_move(Cell::new(1, 1)).unwrap();
        let action = Move::new(PlayerId::from("o"), Cell::new(1, 1));
        assert!(matches!(
            MoveContract::pre(&game, &action),
            Err(MoveError::CellMarked(_))
        ));
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = fresh();
        let action = Move::new(PlayerId::from("o"), Cell::new(1, 1));
        assert_eq!(
            MoveContract::pre(&game, &action),
            Err(MoveError::WrongPlayer(PlayerId::from("o")))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = fresh();
        let mut after = before.clone();
        after.apply_move(Cell::new(0, 0)).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = fresh();
        let mut after = before.clone();
        after.apply_move(Cell::new(0, 0)).unwrap();
        after
            .board
            .set_unchecked(Cell::new(2, 2), Square::Occupied(PlayerId::from("o")));
        assert!(MoveContract::post(&before, &after).is_err());
    }
}
