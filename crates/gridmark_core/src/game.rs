//! Turn controller: the game state machine.
//!
//! A game is a single owned [`GameState`]. Moves go through
//! [`GameState::apply_move`] (human input) or
//! [`GameState::apply_computer_move`] (the scheduled computer turn); both
//! either apply completely or leave the state untouched.
//!
//! ```text
//!   AwaitingMove ──move──▶ AwaitingMove
//!        │
//!        ├──line complete──▶ Won(player)   (terminal)
//!        └──board full────▶ Stalemate      (terminal)
//! ```

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::error::ConfigError;
use super::rules::{self, Line};
use super::types::{BoardSize, Cell, PlayerId, Players};
use super::Board;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Phase of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// Waiting for the current player to move.
    AwaitingMove,
    /// A player completed a line.
    Won(PlayerId),
    /// The board filled up with no complete line.
    Stalemate,
}

impl Phase {
    /// Returns true for `Won` and `Stalemate`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::AwaitingMove)
    }
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) players: Players,
    pub(crate) first_player: PlayerId,
    pub(crate) current_player: PlayerId,
    pub(crate) computer_player: Option<PlayerId>,
    pub(crate) phase: Phase,
    pub(crate) winning_lines: Vec<Line>,
    pub(crate) last_move: Option<Cell>,
    pub(crate) history: Vec<Move>,
}

/// Starts a new game.
///
/// `first_player` moves first; `computer_player`, when given, is driven by
/// the computer and its turns are closed to human input.
///
/// # Errors
///
/// Returns [`ConfigError`] when `board_size` is even or below 3, or when
/// `first_player` or `computer_player` is not one of `players`.
#[instrument(skip(players), fields(first = %first_player))]
pub fn new_game(
    board_size: usize,
    players: Players,
    first_player: PlayerId,
    computer_player: Option<PlayerId>,
) -> Result<GameState, ConfigError> {
    let size = BoardSize::new(board_size)?;

    if !players.contains(&first_player) {
        return Err(ConfigError::new(format!(
            "First player {} is not one of the players.",
            first_player
        )));
    }
    if let Some(computer) = &computer_player
        && !players.contains(computer)
    {
        return Err(ConfigError::new(format!(
            "Computer player {} is not one of the players.",
            computer
        )));
    }

    info!(%size, computer = ?computer_player, "Starting new game");

    Ok(GameState {
        board: Board::new(size),
        players,
        current_player: first_player.clone(),
        first_player,
        computer_player,
        phase: Phase::AwaitingMove,
        winning_lines: Vec::new(),
        last_move: None,
        history: Vec::new(),
    })
}

impl GameState {
    /// Applies a human move for the current player.
    ///
    /// # Errors
    ///
    /// Rejects the move, leaving the game unchanged, when the game is over,
    /// the computer is to move, or the cell is off the board or marked.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, cell: Cell) -> Result<&Phase, MoveError> {
        if self.is_waiting_for_computer() {
            debug!(%cell, "Ignoring input while the computer is to move");
            return Err(MoveError::AwaitingComputer);
        }
        let action = Move::new(self.current_player.clone(), cell);
        self.commit(action)
    }

    /// Applies the computer's move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::WrongPlayer`] if the computer is not the current
    /// player, and the same rejections as [`GameState::apply_move`] otherwise.
    #[instrument(skip(self))]
    pub fn apply_computer_move(&mut self, cell: Cell) -> Result<&Phase, MoveError> {
        let computer = self
            .computer_player
            .clone()
            .ok_or_else(|| MoveError::WrongPlayer(self.current_player.clone()))?;
        self.commit(Move::new(computer, cell))
    }

    fn commit(&mut self, action: Move) -> Result<&Phase, MoveError> {
        MoveContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.mark(action.cell, &action.player)?;
        self.last_move = Some(action.cell);
        self.history.push(action.clone());

        let evaluation = rules::evaluate(&self.board, &self.players);
        if let Some(winner) = evaluation.winner {
            info!(%winner, lines = ?evaluation.lines, "Game won");
            self.winning_lines = evaluation.lines;
            self.phase = Phase::Won(winner);
        } else if evaluation.stalemate {
            info!("Game ended in stalemate");
            self.phase = Phase::Stalemate;
        } else {
            self.current_player = self.players.other(&action.player).clone();
            debug!(next = %self.current_player, "Turn passed");
        }

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        Ok(&self.phase)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side length.
    pub fn board_size(&self) -> BoardSize {
        self.board.size()
    }

    /// Returns the players in priority order.
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Returns the player who moved first.
    pub fn first_player(&self) -> &PlayerId {
        &self.first_player
    }

    /// Returns the player to move, or the last mover once the game is over.
    pub fn current_player(&self) -> &PlayerId {
        &self.current_player
    }

    /// Returns the computer-controlled player, if any.
    pub fn computer_player(&self) -> Option<&PlayerId> {
        self.computer_player.as_ref()
    }

    /// Returns the phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the winner, if the game was won.
    pub fn winning_player(&self) -> Option<&PlayerId> {
        match &self.phase {
            Phase::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Returns true if the game ended in stalemate.
    pub fn is_stalemate(&self) -> bool {
        self.phase == Phase::Stalemate
    }

    /// Returns true once the game is won or stalemated.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// True while the computer owns the turn and human input is ignored.
    pub fn is_waiting_for_computer(&self) -> bool {
        !self.is_terminal() && self.computer_player.as_ref() == Some(&self.current_player)
    }

    /// The most recently marked cell.
    pub fn last_move(&self) -> Option<Cell> {
        self.last_move
    }

    /// Moves applied so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The first line completed by the winner, for highlighting.
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_lines.first().copied()
    }

    /// Every line completed by the winner.
    pub fn winning_lines(&self) -> &[Line] {
        &self.winning_lines
    }
}
