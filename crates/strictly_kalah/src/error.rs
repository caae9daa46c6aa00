//! Board setup errors.

use crate::types::{PlayerName, Seat};

/// Error raised when a board cannot be created from the given inputs.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// Pit count outside the supported range.
    #[display("Pits per side must be within 1..={max}, got {pits}")]
    PitsPerSide {
        /// Requested pit count.
        pits: usize,
        /// Largest supported pit count.
        max: usize,
    },

    /// Seed count outside the supported range.
    #[display("Seeds per pit must be within 1..={max}, got {seeds}")]
    SeedsPerPit {
        /// Requested seed count.
        seeds: u32,
        /// Largest supported seed count.
        max: u32,
    },

    /// Both participants have the same identity.
    #[display("Participants must be distinct, got {_0} twice")]
    SameParticipant(PlayerName),

    /// A participant name is empty.
    #[display("Player name must not be blank")]
    BlankName,

    /// A custom row does not match the other row's length.
    #[display("Row for seat {seat} has {len} pits, expected {expected}")]
    RowLength {
        /// Seat owning the row.
        seat: Seat,
        /// Actual row length.
        len: usize,
        /// Expected row length.
        expected: usize,
    },

    /// Pits and stores together hold more seeds than any valid board can.
    #[display("Board holds more than {max} seeds")]
    SeedTotal {
        /// Largest supported seed total.
        max: u32,
    },

    /// The turn counter leaves no room for another move.
    #[display("Turn counter {_0} is at its limit")]
    TurnLimit(u32),
}

impl std::error::Error for SetupError {}
