//! Display-ready projection of a game.

use super::error::ConfigError;
use super::game::{GameState, Phase};
use super::types::PlayerId;
use derive_more::Display;
use serde::Serialize;

/// What a status line should say about the game.
///
/// When several could apply the precedence is
/// `ConfigError > Won > Stalemate > ComputerThinking > Playing`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
pub enum Status {
    /// A human is to move.
    #[display("Current Player: {}", _0)]
    Playing(PlayerId),
    /// The computer is choosing its move.
    #[display("Computer ({}) is playing.", _0)]
    ComputerThinking(PlayerId),
    /// A player won.
    #[display("Player {} won.", _0)]
    Won(PlayerId),
    /// The board filled up with no winner.
    #[display("Game ended in stalemate.")]
    Stalemate,
    /// The requested game could not be started.
    #[display("Error: {}", _0)]
    ConfigError(String),
}

impl Status {
    /// True for `Won` and `Stalemate`.
    pub fn is_game_over(&self) -> bool {
        matches!(self, Status::Won(_) | Status::Stalemate)
    }
}

impl GameState {
    /// Projects this game into a [`Status`].
    pub fn status(&self) -> Status {
        match self.phase() {
            Phase::Won(player) => Status::Won(player.clone()),
            Phase::Stalemate => Status::Stalemate,
            Phase::AwaitingMove if self.is_waiting_for_computer() => {
                Status::ComputerThinking(self.current_player().clone())
            }
            Phase::AwaitingMove => Status::Playing(self.current_player().clone()),
        }
    }
}

/// Status for either a running game or the error that kept one from starting.
pub fn current_status(game: Result<&GameState, &ConfigError>) -> Status {
    match game {
        Err(err) => Status::ConfigError(err.message().to_string()),
        Ok(game) => game.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSize, Cell, Players, new_game};

    #[test]
    fn test_status_text() {
        let x = PlayerId::from("x");
        assert_eq!(Status::Playing(x.clone()).to_string(), "Current Player: x");
        assert_eq!(
            Status::ComputerThinking(x.clone()).to_string(),
            "Computer (x) is playing."
        );
        assert_eq!(Status::Won(x).to_string(), "Player x won.");
        assert_eq!(Status::Stalemate.to_string(), "Game ended in stalemate.");
    }

    #[test]
    fn test_config_error_takes_precedence() {
        let err = BoardSize::new(4).unwrap_err();
        let status = current_status(Err(&err));
        assert_eq!(
            status.to_string(),
            "Error: Board size is not compatible with the game."
        );
    }

    #[test]
    fn test_computer_first_is_thinking() {
        let game = new_game(
            3,
            Players::default(),
            PlayerId::from("x"),
            Some(PlayerId::from("x")),
        )
        .unwrap();
        assert_eq!(current_status(Ok(&game)), Status::ComputerThinking(PlayerId::from("x")));
    }

    #[test]
    fn test_won_beats_computer_thinking() {
        let mut game = new_game(
            3,
            Players::default(),
            PlayerId::from("x"),
            Some(PlayerId::from("o")),
        )
        .unwrap();
        for (human, computer) in [((0, 0), (1, 0)), ((0, 1), (1, 1))] {
            game.apply_move(Cell::new(human.0, human.1)).unwrap();
            game.apply_computer_move(Cell::new(computer.0, computer.1)).unwrap();
        }
        game.apply_move(Cell::new(0, 2)).unwrap();
        assert_eq!(game.status(), Status::Won(PlayerId::from("x")));
        assert!(game.status().is_game_over());
    }
}
