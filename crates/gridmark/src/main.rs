//! Gridmark - terminal front end

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use gridmark::{Cli, Command, GameConfig};
use std::path::Path;
use tokio::io::BufReader;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let overrides = cli.command.overrides();
    match cli.command {
        Command::Play { config, .. } => {
            let config = load_config(config.as_deref())?.with_overrides(overrides);
            play(config).await
        }
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Loads the config file, or defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Loading {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

/// Run a console game on stdin/stdout
#[instrument(skip_all)]
async fn play(config: GameConfig) -> Result<()> {
    info!("Starting gridmark");
    let input = BufReader::new(tokio::io::stdin());
    gridmark::run(config, input, tokio::io::stdout()).await
}

/// Validate a config file and print the resolved settings
fn check_config(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    match config.validate() {
        Ok(()) => {
            info!(path = %path.display(), "Config is valid");
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Config is invalid");
            Err(e).with_context(|| format!("Validating {}", path.display()))
        }
    }
}
