//! Server configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_kalah::BoardConfig;
use tracing::{debug, info, instrument};

/// Configuration for the board registry and the command-line front end.
///
/// ```toml
/// log_filter = "info"
///
/// [board]
/// pits_per_side = 6
/// seeds_per_pit = 6
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Board shape for newly created boards.
    #[serde(default)]
    board: BoardConfig,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            board: BoardConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            pits = config.board.pits_per_side(),
            seeds = config.board.seeds_per_pit(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config
            .board
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid board config: {}", e)))?;
        Ok(config)
    }

    /// Returns a copy with the board shape overridden where a value is given.
    pub fn with_board_overrides(
        mut self,
        pits_per_side: Option<usize>,
        seeds_per_pit: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let pits = pits_per_side.unwrap_or(self.board.pits_per_side());
        let seeds = seeds_per_pit.unwrap_or(self.board.seeds_per_pit());
        self.board = BoardConfig::new(pits, seeds)
            .map_err(|e| ConfigError::new(format!("Invalid board override: {}", e)))?;
        Ok(self)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
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
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
