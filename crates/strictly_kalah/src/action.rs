//! First-class move types for Kalah.
//!
//! A move is the player's intent: pick up every seed in one of their pits.
//! It can be validated against a board before anything is sown.

use crate::types::{PlayerName, Seat, Winner};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A move: a player choosing one of their own regular pits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct Move {
    /// The player making the move.
    pub player: PlayerName,
    /// Index of the pit in the player's own row.
    pub pit: usize,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> pit {}", self.player, self.pit)
    }
}

/// Error that can occur when validating a move.
///
/// Every variant is detected before any seed moves, so a rejected move leaves
/// the board exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The pit index is outside the row.
    #[display("Pit {pit} is out of range (board has {pits} pits per side)")]
    InvalidPit {
        /// Requested pit index.
        pit: usize,
        /// Pits per side on this board.
        pits: usize,
    },

    /// The chosen pit holds no seeds.
    #[display("Pit {_0} is empty")]
    EmptyPit(usize),

    /// The acting player is not the player to move.
    #[display("It's not {_0}'s turn")]
    NotYourTurn(PlayerName),

    /// The game has already ended.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// The turn counter cannot advance any further.
    #[display("Turn counter {_0} is at its limit")]
    TurnLimit(u32),
}

impl std::error::Error for MoveError {}

/// What the last sown seed did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sowing {
    /// Last seed landed anywhere without a special effect.
    Plain,
    /// Last seed landed in the mover's own store; the mover goes again.
    ExtraTurn,
    /// Last seed landed in an empty pit of the mover opposite a non-empty pit.
    Capture {
        /// Mover's pit that received the last seed.
        pit: usize,
        /// Seeds moved into the mover's store: the last seed plus the
        /// opposite pit's contents.
        seeds: u32,
    },
}

/// Report of a successfully applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveOutcome {
    /// Seat that moved.
    pub mover: Seat,
    /// Pit the seeds were picked up from.
    pub pit: usize,
    /// Number of seeds sown.
    pub sown: u32,
    /// Effect of the last seed.
    pub sowing: Sowing,
    /// Final result, if this move ended the game.
    pub finished: Option<Winner>,
}

impl MoveOutcome {
    /// Returns true if the mover keeps the turn.
    ///
    /// Also true for a move that ends the game in the mover's store, even
    /// though nobody moves afterwards.
    pub fn is_extra_turn(&self) -> bool {
        matches!(self.sowing, Sowing::ExtraTurn)
    }

    /// Seeds captured into the store, if the move captured.
    pub fn captured(&self) -> Option<u32> {
        match self.sowing {
            Sowing::Capture { seeds, .. } => Some(seeds),
            Sowing::Plain | Sowing::ExtraTurn => None,
        }
    }

    /// Returns true if this move ended the game.
    pub fn game_ended(&self) -> bool {
        self.finished.is_some()
    }
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} sowed {} seed(s) from pit {}", self.mover, self.sown, self.pit)?;
        match self.sowing {
            Sowing::Plain => {}
            Sowing::ExtraTurn => write!(f, ", extra turn")?,
            Sowing::Capture { pit, seeds } => write!(f, ", captured {seeds} at pit {pit}")?,
        }
        if let Some(winner) = &self.finished {
            write!(f, ", game over: {winner}")?;
        }
        Ok(())
    }
}
