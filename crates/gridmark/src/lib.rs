//! Gridmark library - game sessions and the console front end
//!
//! Wraps the pure engine in `gridmark_core` with everything needed to play:
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Session**: one game at a time, with the computer's delayed turn
//! - **Console**: line-oriented driver that prints the board and status
//! - **CLI**: `play` and `check-config` commands
//!
//! # Example
//!
//! ```no_run
//! use gridmark::{GameConfig, Session};
//! use gridmark_core::Cell;
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::from_file("gridmark.toml")?;
//! let (events, _rx) = mpsc::unbounded_channel();
//! let mut session = Session::start(&config, events).await;
//! session.submit(Cell::new(1, 1)).await?;
//! println!("{}", session.status().await);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod console;
mod session;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{GameConfig, Overrides};

// Crate-level exports - Console driver
pub use console::{ConsoleCommand, ParseCommandError, board_text, parse_command, run};

// Crate-level exports - Session management
pub use session::{Session, SessionEvent};
