//! Command-line interface for the `kalah` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Kalah - type-safe Kalah boards with serialized moves
#[derive(Parser, Debug)]
#[command(name = "kalah")]
#[command(about = "Play or replay Kalah games through the board registry", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat game in the terminal
    Play {
        /// Players and board shape
        #[command(flatten)]
        game: GameArgs,
    },

    /// Apply a list of pits in turn order and print the final board as JSON
    Replay {
        /// Players and board shape
        #[command(flatten)]
        game: GameArgs,

        /// Pit indices, comma separated, each played by whoever is to move
        #[arg(short, long, value_delimiter = ',', required = true)]
        moves: Vec<usize>,
    },
}

/// Participants and optional board shape overrides.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Player who moves first
    #[arg(long, default_value = "Player 1")]
    pub first: String,

    /// Player who moves second
    #[arg(long, default_value = "Player 2")]
    pub second: String,

    /// Pits per side (overrides the config file)
    #[arg(long)]
    pub pits: Option<usize>,

    /// Seeds per pit at the start (overrides the config file)
    #[arg(long)]
    pub seeds: Option<u32>,
}
