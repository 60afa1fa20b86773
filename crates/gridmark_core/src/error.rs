//! Configuration error raised before a game can start.

use derive_more::{Display, Error};
use tracing::instrument;

/// Configuration error.
///
/// Raised for board sizes the game cannot use and for player settings that
/// do not name one of the two configured players. A game is never started
/// from a configuration that produced this error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the message without location details.
    pub fn message(&self) -> &str {
        &self.message
    }
}
