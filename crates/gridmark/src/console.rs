//! Line-oriented console driver.
//!
//! Reads commands from an async reader and prints the board and status
//! line after every change. Moves the game rejects are dropped without a
//! message, the same way a click on a taken square does nothing.

use crate::config::GameConfig;
use crate::session::Session;
use anyhow::Result;
use derive_more::{Display, Error};
use gridmark_core::{Cell, GameState, Square};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

const HELP: &str = "Enter ROW COL to mark a cell (1-based), \"reset\" for a new game, or \"quit\".";

/// A parsed line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Mark the given zero-based cell.
    Mark(Cell),
    /// Start a new game with the same settings.
    Reset,
    /// Leave the program.
    Quit,
}

/// Input that is not a console command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized input: {:?}", input)]
pub struct ParseCommandError {
    input: String,
}

/// Parses `ROW COL` (1-based), `reset`, or `quit`.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, ParseCommandError> {
    let trimmed = line.trim();
    let invalid = || ParseCommandError {
        input: trimmed.to_string(),
    };

    match trimmed.to_ascii_lowercase().as_str() {
        "reset" | "r" => return Ok(ConsoleCommand::Reset),
        "quit" | "q" | "exit" => return Ok(ConsoleCommand::Quit),
        _ => {}
    }

    let mut parts = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let row: usize = row.parse().map_err(|_| invalid())?;
    let col: usize = col.parse().map_err(|_| invalid())?;
    if row == 0 || col == 0 {
        return Err(invalid());
    }
    Ok(ConsoleCommand::Mark(Cell::new(row - 1, col - 1)))
}

/// Plays games from `input` until `quit` or end of input.
#[instrument(skip_all, fields(board_size = config.board_size()))]
pub async fn run<R, W>(config: GameConfig, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Starting console game");
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut session = Session::start(&config, event_tx).await;
    let mut lines = input.lines();

    output.write_all(format!("{HELP}\n\n").as_bytes()).await?;

    loop {
        tokio::select! {
            biased;

            Some(event) = event_rx.recv() => {
                debug!(?event, "Session event");
                render(&session, &mut output).await?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(ConsoleCommand::Mark(cell)) => {
                        if let Err(error) = session.submit(cell).await {
                            debug!(%cell, %error, "Move ignored");
                        }
                    }
                    Ok(ConsoleCommand::Reset) => {
                        session.new_game(&config).await;
                    }
                    Ok(ConsoleCommand::Quit) => {
                        info!("User quit");
                        break;
                    }
                    Err(error) => {
                        debug!(%error, "Bad input");
                        output.write_all(format!("{HELP}\n").as_bytes()).await?;
                    }
                }
            }
        }
    }

    session.cancel_pending();
    output.flush().await?;
    Ok(())
}

async fn render<W: AsyncWrite + Unpin>(session: &Session, output: &mut W) -> Result<()> {
    let (game, status) = session.view().await;
    let mut text = String::new();
    if let Some(game) = game {
        text.push_str(&board_text(&game));
        text.push('\n');
    }
    text.push_str(&status.to_string());
    text.push_str("\n\n");
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

/// The board, one row per line, with the winner's completed lines upper-cased.
pub fn board_text(game: &GameState) -> String {
    let size = game.board_size();
    let highlighted: Vec<Cell> = game
        .winning_lines()
        .iter()
        .flat_map(|line| line.cells(size))
        .collect();

    let mut text = String::new();
    for (cell, square) in game.board().cells() {
        if cell.col > 0 {
            text.push(' ');
        } else if cell.row > 0 {
            text.push('\n');
        }
        match square {
            Square::Empty => text.push('.'),
            Square::Occupied(player) if highlighted.contains(&cell) => {
                text.push_str(&player.as_str().to_uppercase())
            }
            Square::Occupied(player) => text.push_str(player.as_str()),
        }
    }
    text
}
