//! Core domain types for Kalah.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Opaque player identity.
///
/// The core never interprets a name; it only compares names and uses them as
/// keys. Authentication happens before a name reaches the engine.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    /// Creates a player name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the name is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Unique board identifier, assigned once at creation.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BoardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A participant's fixed side of the board.
///
/// The participant who created the board sits in [`Seat::First`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize, EnumIter,
)]
pub enum Seat {
    /// The creating participant.
    First,
    /// The invited participant.
    Second,
}

impl Seat {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Array index of this seat in per-seat storage.
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// Current status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress {
        /// Seat whose turn it is.
        to_move: Seat,
    },
    /// Game ended with one seat holding the larger store.
    Won(Seat),
    /// Game ended with equal stores.
    Draw,
}

impl GameStatus {
    /// Decides the final status from the two store totals.
    pub fn from_stores(stores: [u32; 2]) -> Self {
        let [first, second] = stores;
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => GameStatus::Won(Seat::First),
            std::cmp::Ordering::Less => GameStatus::Won(Seat::Second),
            std::cmp::Ordering::Equal => GameStatus::Draw,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }
}

/// Result of a finished game, expressed in player identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Winner {
    /// The named player has the strictly larger store.
    #[display("{_0} wins")]
    Player(PlayerName),
    /// Both stores are equal.
    #[display("draw")]
    Draw,
}
