//! Strictly Kalah - command-line front end
//!
//! Hot-seat play and move-list replay over the board registry.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use strictly_kalah_server::{BoardRegistry, ServerConfig, play, replay, to_json};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };

    // Logs go to stderr; stdout carries the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play { game } => run_play(config, game),
        Command::Replay { game, moves } => run_replay(config, game, moves),
    }
}

fn registry_for(config: ServerConfig, game: &GameArgs) -> Result<BoardRegistry> {
    let config = config.with_board_overrides(game.pits, game.seeds)?;
    Ok(BoardRegistry::new(*config.board()))
}

/// Play a hot-seat game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: ServerConfig, game: GameArgs) -> Result<()> {
    let registry = registry_for(config, &game)?;
    let board = registry.create(game.first.as_str(), game.second.as_str())?;
    info!(board_id = %board.id(), "Starting hot-seat game");

    let stdin = std::io::stdin();
    match play(&registry, board.id(), stdin.lock(), std::io::stdout())? {
        Some(winner) => info!(%winner, "Game finished"),
        None => info!("Game abandoned"),
    }
    Ok(())
}

/// Replay a move list and print the final board as JSON
#[instrument(skip(config))]
fn run_replay(config: ServerConfig, game: GameArgs, moves: Vec<usize>) -> Result<()> {
    let registry = registry_for(config, &game)?;
    let board = replay(&registry, &game.first, &game.second, &moves)?;
    println!("{}", to_json(&board)?);
    Ok(())
}
