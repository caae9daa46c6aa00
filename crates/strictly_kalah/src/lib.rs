//! Strictly Kalah - a type-safe Kalah (Mancala) rules engine
//!
//! Boards are immutable values. [`apply_move`] validates a move against a
//! board and returns the successor board together with a report of what the
//! last seed did.
//!
//! # Architecture
//!
//! - **Board**: participants, pit rows, stores and status
//! - **Engine**: sowing, extra turns, captures and game termination
//! - **Contracts**: move preconditions checked in a fixed order
//! - **Invariants**: properties every published board satisfies
//! - **Snapshot**: the serializable, name-keyed view of a board
//!
//! # Example
//!
//! ```
//! use strictly_kalah::{apply_move, BoardSetup, PlayerName, Sowing};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let board = BoardSetup::new("Alice", "Bob").start()?;
//! let (board, outcome) = apply_move(&board, &PlayerName::from("Alice"), 2)?;
//!
//! assert_eq!(outcome.sowing, Sowing::Plain);
//! assert_eq!(board.active_player(), Some(&PlayerName::from("Bob")));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
mod contracts;
mod engine;
mod error;
mod invariants;
mod layout;
mod setup;
mod snapshot;
mod types;

pub use action::{Move, MoveError, MoveOutcome, Sowing};
pub use board::BoardState;
pub use config::{
    BoardConfig, DEFAULT_PITS_PER_SIDE, DEFAULT_SEEDS_PER_PIT, MAX_PITS_PER_SIDE,
    MAX_SEEDS_PER_PIT, MAX_TOTAL_SEEDS,
};
pub use contracts::{
    Contract, GameInProgress, LegalMove, MoveContract, PitInRange, PitNotEmpty, PlayersTurn,
    TurnAvailable,
};
pub use engine::apply_move;
pub use error::SetupError;
pub use invariants::{
    ActivePlayerInvariant, Invariant, InvariantSet, InvariantViolation, KalahInvariants,
    RowShapeInvariant, SeedConservationInvariant,
};
pub use layout::{Slot, SowingCycle};
pub use setup::BoardSetup;
pub use snapshot::{BoardSnapshot, NamedPlayer, SnapshotError};
pub use types::{BoardId, GameStatus, PlayerName, Seat, Winner};
