//! Command-line interface for gridmark.

use crate::config::Overrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gridmark - N×N tic-tac-toe against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "gridmark")]
#[command(about = "Grid marking game for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board side length (odd, at least 3)
        #[arg(short, long)]
        size: Option<usize>,

        /// Player who moves first
        #[arg(long)]
        first: Option<String>,

        /// Player controlled by the computer ("-" for none)
        #[arg(long)]
        computer: Option<String>,

        /// Computer thinking time in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for the computer's random fallback
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a config file and exit
    CheckConfig {
        /// Path to the TOML game config
        #[arg(short, long)]
        config: PathBuf,
    },
}

impl Command {
    /// Command-line overrides for `play`, or none for other commands.
    pub fn overrides(&self) -> Overrides {
        match self {
            Command::Play {
                size,
                first,
                computer,
                delay_ms,
                seed,
                ..
            } => Overrides {
                board_size: *size,
                first_player: first.clone(),
                computer_player: computer.clone(),
                computer_delay_ms: *delay_ms,
                seed: *seed,
            },
            Command::CheckConfig { .. } => Overrides::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_flags_become_overrides() {
        let cli = Cli::parse_from([
            "gridmark", "play", "--size", "5", "--computer", "o", "--delay-ms", "0", "--seed", "4",
        ]);
        let overrides = cli.command.overrides();
        assert_eq!(overrides.board_size, Some(5));
        assert_eq!(overrides.computer_player.as_deref(), Some("o"));
        assert_eq!(overrides.computer_delay_ms, Some(0));
        assert_eq!(overrides.seed, Some(4));
        assert_eq!(overrides.first_player, None);
    }

    #[test]
    fn test_check_config_requires_path() {
        assert!(Cli::try_parse_from(["gridmark", "check-config"]).is_err());
        let cli = Cli::parse_from(["gridmark", "check-config", "--config", "game.toml"]);
        assert!(matches!(cli.command, Command::CheckConfig { .. }));
    }
}
