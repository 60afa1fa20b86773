//! Core domain types for grid marking games.

use super::error::ConfigError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Message reported for board sizes the game cannot be played on.
pub(crate) const INCOMPATIBLE_SIZE: &str = "Board size is not compatible with the game.";

/// Side length of a square board.
///
/// Always odd and at least 3, so every board has a single center cell and
/// two diagonals of the same length as its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[display("{}", _0)]
pub struct BoardSize(usize);

impl BoardSize {
    /// The smallest playable board.
    pub const MIN: BoardSize = BoardSize(3);

    /// Validates a raw side length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `size` is even, smaller than 3, or so
    /// large that the board could not be allocated.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size % 2 == 0 || size < 3 {
            return Err(ConfigError::new(INCOMPATIBLE_SIZE));
        }
        let max_cells = isize::MAX as usize / std::mem::size_of::<Square>();
        match size.checked_mul(size) {
            Some(cells) if cells <= max_cells => Ok(Self(size)),
            _ => Err(ConfigError::new(INCOMPATIBLE_SIZE)),
        }
    }

    /// Returns the side length.
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns the number of cells on the board.
    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }

    /// Returns the center cell.
    pub fn center(self) -> Cell {
        Cell::new(self.0 / 2, self.0 / 2)
    }

    /// Returns true if the cell lies on the board.
    pub fn contains(self, cell: Cell) -> bool {
        cell.row < self.0 && cell.col < self.0
    }

    /// Converts signed coordinates into a cell, if they lie on the board.
    pub fn cell_at(self, row: isize, col: isize) -> Option<Cell> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        let cell = Cell::new(row, col);
        self.contains(cell).then_some(cell)
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::MIN
    }
}

impl<'de> Deserialize<'de> for BoardSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = usize::deserialize(deserializer)?;
        BoardSize::new(raw).map_err(|e| serde::de::Error::custom(e.message))
    }
}

/// Identifier of one of the two players.
///
/// Opaque to the engine: only equality and configured order matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display("{}", _0)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The ordered pair of players in a game.
///
/// Order decides win priority when evaluating the board. Turns alternate
/// between the two, starting from whichever one the game names first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    first: PlayerId,
    second: PlayerId,
}

impl Players {
    /// Creates the ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an id is blank or both ids are equal.
    #[instrument(skip(first, second))]
    pub fn new(first: impl Into<PlayerId>, second: impl Into<PlayerId>) -> Result<Self, ConfigError> {
        let first = first.into();
        let second = second.into();

        if first.as_str().trim().is_empty() || second.as_str().trim().is_empty() {
            return Err(ConfigError::new("Player ids must not be blank."));
        }
        if first == second {
            return Err(ConfigError::new(format!(
                "Players must be distinct, got {} twice.",
                first
            )));
        }

        Ok(Self { first, second })
    }

    /// Returns the player with win priority.
    pub fn first(&self) -> &PlayerId {
        &self.first
    }

    /// Returns the other player.
    pub fn second(&self) -> &PlayerId {
        &self.second
    }

    /// Returns true if `player` is one of the pair.
    pub fn contains(&self, player: &PlayerId) -> bool {
        *player == self.first || *player == self.second
    }

    /// Returns the opponent of `player`.
    ///
    /// Turn switching is a toggle, so anything that is not the first
    /// player maps to the first player.
    pub fn other(&self, player: &PlayerId) -> &PlayerId {
        if *player == self.first {
            &self.second
        } else {
            &self.first
        }
    }

    /// Iterates both players in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        [&self.first, &self.second].into_iter()
    }
}

impl Default for Players {
    fn default() -> Self {
        Self {
            first: PlayerId::from("x"),
            second: PlayerId::from("o"),
        }
    }
}

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display("({}, {})", row, col)]
pub struct Cell {
    /// Zero-based row, counted from the top.
    pub row: usize,
    /// Zero-based column, counted from the left.
    pub col: usize,
}

impl Cell {
    /// Creates a cell.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Unmarked cell.
    Empty,
    /// Cell marked by a player.
    Occupied(PlayerId),
}

impl Square {
    /// Returns the owning player, if any.
    pub fn owner(&self) -> Option<&PlayerId> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }

    /// Returns true if the cell is unmarked.
    pub fn is_empty(&self) -> bool {
        matches!(self, Square::Empty)
    }
}
