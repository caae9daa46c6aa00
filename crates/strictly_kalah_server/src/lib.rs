//! Strictly Kalah server - live boards behind a per-board concurrency guard
//!
//! # Architecture
//!
//! - **Registry**: owns every live board; moves against one board are
//!   serialized, moves against different boards run in parallel
//! - **Config**: TOML configuration for board shape and logging
//! - **Console**: hot-seat play and replay on top of the registry
//!
//! # Example
//!
//! ```
//! use strictly_kalah_server::BoardRegistry;
//! use strictly_kalah::PlayerName;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = BoardRegistry::default();
//! let board = registry.create("Alice", "Bob")?;
//!
//! let (board, _) = registry.apply_move(board.id(), &PlayerName::from("Alice"), 2)?;
//! assert_eq!(board.turn_num(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod console;
mod registry;

pub use config::{ConfigError, ServerConfig};
pub use console::{play, replay, to_json};
pub use registry::{BoardRegistry, RegistryError};
