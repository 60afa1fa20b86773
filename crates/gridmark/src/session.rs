//! Single-game session: serializes moves and runs the computer's turn.
//!
//! All access to the [`GameState`] goes through one async mutex, so two
//! moves arriving together can never both pass validation against the same
//! open cell. The computer's move is a spawned task that sleeps for the
//! configured thinking time and then plays through the same path as human
//! input. Starting a new game aborts that task, and a generation counter
//! keeps a task that already woke up from touching the replacement game.

use crate::config::GameConfig;
use gridmark_core::{
    Cell, ConfigError, EdgeDrift, GameState, MoveError, PlayerId, Status, Strategy, current_status,
};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Notifications sent to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new game started, or failed to start.
    Started(Status),
    /// A move was applied.
    Moved {
        /// Who moved.
        player: PlayerId,
        /// Where.
        cell: Cell,
        /// Status after the move.
        status: Status,
    },
}

struct Shared {
    game: Result<GameState, ConfigError>,
    generation: u64,
    strategy: Box<dyn Strategy + Send>,
    rng: ChaCha8Rng,
}

/// Owns the current game and the pending computer move.
pub struct Session {
    shared: Arc<Mutex<Shared>>,
    pending: Option<JoinHandle<()>>,
    delay: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl Session {
    /// Starts a session with a game built from `config`.
    ///
    /// An invalid configuration does not fail the session; it is reported
    /// through [`Session::status`] until a valid game is started.
    #[instrument(skip_all)]
    pub async fn start(config: &GameConfig, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        let strategy = Box::new(EdgeDrift::new(config.rng()));
        Self::with_strategy(config, strategy, events).await
    }

    /// Starts a session whose computer player uses `strategy`.
    #[instrument(skip_all, fields(strategy = strategy.name()))]
    pub async fn with_strategy(
        config: &GameConfig,
        strategy: Box<dyn Strategy + Send>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let shared = Shared {
            game: Err(ConfigError::new("No game started")),
            generation: 0,
            strategy,
            rng: config.rng(),
        };
        let mut session = Self {
            shared: Arc::new(Mutex::new(shared)),
            pending: None,
            delay: config.computer_delay(),
            events,
        };
        session.new_game(config).await;
        session
    }

    /// Replaces the current game with one built from `config`.
    ///
    /// Any pending computer move is cancelled first. If the computer moves
    /// first in the new game, its turn is scheduled right away.
    #[instrument(skip_all)]
    pub async fn new_game(&mut self, config: &GameConfig) -> Status {
        self.cancel_pending();
        self.delay = config.computer_delay();

        let mut shared = self.shared.lock().await;
        shared.generation += 1;
        shared.game = config.new_game();
        let generation = shared.generation;
        let status = current_status(shared.game.as_ref());
        let computer_first = matches!(&shared.game, Ok(game) if game.is_waiting_for_computer());
        drop(shared);

        match &status {
            Status::ConfigError(message) => warn!(%message, "Game not started"),
            _ => info!(generation, %status, "Game started"),
        }
        self.emit(SessionEvent::Started(status.clone()));

        if computer_first {
            self.schedule_computer_move(generation);
        }
        status
    }

    /// Submits a human move.
    ///
    /// # Errors
    ///
    /// Rejected moves leave the game unchanged. [`MoveError::NotStarted`]
    /// is returned while the configuration is invalid and
    /// [`MoveError::AwaitingComputer`] while the computer is thinking.
    #[instrument(skip(self))]
    pub async fn submit(&mut self, cell: Cell) -> Result<Status, MoveError> {
        let mut shared = self.shared.lock().await;
        let generation = shared.generation;
        let game = shared.game.as_mut().map_err(|_| MoveError::NotStarted)?;

        let player = game.current_player().clone();
        game.apply_move(cell)?;
        let status = game.status();
        let computer_next = game.is_waiting_for_computer();
        drop(shared);

        debug!(%player, %cell, %status, "Move applied");
        self.emit(SessionEvent::Moved {
            player,
            cell,
            status: status.clone(),
        });

        if computer_next {
            self.schedule_computer_move(generation);
        }
        Ok(status)
    }

    /// Current status.
    pub async fn status(&self) -> Status {
        current_status(self.shared.lock().await.game.as_ref())
    }

    /// A copy of the current game, if one is running.
    pub async fn snapshot(&self) -> Option<GameState> {
        self.shared.lock().await.game.as_ref().ok().cloned()
    }

    /// The current game and its status, read under one lock.
    pub async fn view(&self) -> (Option<GameState>, Status) {
        let shared = self.shared.lock().await;
        let status = current_status(shared.game.as_ref());
        (shared.game.as_ref().ok().cloned(), status)
    }

    /// True while a computer move is scheduled and has not yet been played.
    pub fn is_computer_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancels the scheduled computer move, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            if !task.is_finished() {
                debug!("Cancelling pending computer move");
            }
            task.abort();
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("No listener for session events");
        }
    }

    fn schedule_computer_move(&mut self, generation: u64) {
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let delay = self.delay;

        debug!(generation, ?delay, "Scheduling computer move");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(event) = play_computer_turn(&shared, generation).await
                && events.send(event).is_err()
            {
                debug!("No listener for computer move");
            }
        }));
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Chooses and applies the computer's move for `generation`.
///
/// A cell the strategy offers that the game rejects is replaced by a random
/// open cell, so the computer's turn always ends while the game is live.
#[instrument(skip(shared))]
async fn play_computer_turn(shared: &Mutex<Shared>, generation: u64) -> Option<SessionEvent> {
    let mut guard = shared.lock().await;
    let Shared {
        game,
        generation: current,
        strategy,
        rng,
    } = &mut *guard;

    if *current != generation {
        debug!(current = *current, "Game replaced before the computer moved");
        return None;
    }
    let game = game.as_mut().ok()?;
    if !game.is_waiting_for_computer() {
        return None;
    }

    let player = game.current_player().clone();
    match strategy.choose_move(game.board(), game.last_move()) {
        Some(cell) => match game.apply_computer_move(cell).map(|_| ()) {
            Ok(_) => return Some(computer_moved(game, player, cell)),
            Err(error) => warn!(%cell, %error, "Computer move rejected, picking an open cell"),
        },
        None => warn!("Strategy offered no cell, picking an open cell"),
    }

    let open = game.board().available_cells();
    let cell = *open.choose(rng)?;
    match game.apply_computer_move(cell).map(|_| ()) {
        Ok(_) => Some(computer_moved(game, player, cell)),
        Err(error) => {
            warn!(%cell, %error, "Fallback move rejected");
            None
        }
    }
}

fn computer_moved(game: &GameState, player: PlayerId, cell: Cell) -> SessionEvent {
    let status = game.status();
    info!(%player, %cell, %status, "Computer moved");
    SessionEvent::Moved {
        player,
        cell,
        status,
    }
}
