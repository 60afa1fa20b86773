//! Game configuration loaded from TOML and command-line overrides.

use derive_getters::Getters;
use gridmark_core::{ConfigError, GameState, PlayerId, Players, new_game};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Marker accepted in place of a player id to mean "no computer player".
const NO_PLAYER: &str = "-";

/// Settings for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the board; must be odd and at least 3.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// The two players, in win-priority order.
    #[serde(default = "default_players")]
    players: [String; 2],

    /// Who moves first. Defaults to the first of `players`.
    #[serde(default)]
    first_player: Option<String>,

    /// Which player the computer controls, if any.
    #[serde(default)]
    computer_player: Option<String>,

    /// How long the computer "thinks" before moving.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Seed for the computer's random fallback; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_board_size() -> usize {
    3
}

fn default_players() -> [String; 2] {
    ["x".to_string(), "o".to_string()]
}

fn default_computer_delay_ms() -> u64 {
    500
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            players: default_players(),
            first_player: None,
            computer_player: None,
            computer_delay_ms: default_computer_delay_ms(),
            seed: None,
        }
    }
}

/// Per-field overrides, typically from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replaces `board_size`.
    pub board_size: Option<usize>,
    /// Replaces `first_player`.
    pub first_player: Option<String>,
    /// Replaces `computer_player`; `-` clears it.
    pub computer_player: Option<String>,
    /// Replaces `computer_delay_ms`.
    pub computer_delay_ms: Option<u64>,
    /// Replaces `seed`.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Applies overrides on top of this configuration.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(size) = overrides.board_size {
            self.board_size = size;
        }
        if let Some(first) = overrides.first_player {
            self.first_player = Some(first);
        }
        if let Some(computer) = overrides.computer_player {
            self.computer_player = Some(computer);
        }
        if let Some(delay) = overrides.computer_delay_ms {
            self.computer_delay_ms = delay;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        self
    }

    /// The ordered player pair.
    pub fn player_pair(&self) -> Result<Players, ConfigError> {
        let [first, second] = &self.players;
        Players::new(first.as_str(), second.as_str())
    }

    /// The first mover, defaulting to the first configured player.
    pub fn first_player_id(&self) -> PlayerId {
        PlayerId::new(
            self.first_player
                .clone()
                .unwrap_or_else(|| self.players[0].clone()),
        )
    }

    /// The computer player, if one is configured.
    pub fn computer_player_id(&self) -> Option<PlayerId> {
        self.computer_player
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != NO_PLAYER)
            .map(PlayerId::from)
    }

    /// The computer's thinking time.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    /// Random source for the computer's fallback move.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Starts a game from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unplayable board size or player
    /// settings that do not name one of the players.
    #[instrument(skip(self), fields(board_size = self.board_size))]
    pub fn new_game(&self) -> Result<GameState, ConfigError> {
        new_game(
            self.board_size,
            self.player_pair()?,
            self.first_player_id(),
            self.computer_player_id(),
        )
    }

    /// Checks the settings without keeping the game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.new_game().map(|_| ())
    }
}
