//! Board size and seed count configuration.

use crate::error::SetupError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Largest supported number of pits on one side.
pub const MAX_PITS_PER_SIDE: usize = 32;

/// Largest supported number of seeds per pit at creation.
pub const MAX_SEEDS_PER_PIT: u32 = 1000;

/// Largest seed total a board can hold, pits and stores together.
pub const MAX_TOTAL_SEEDS: u32 = 2 * MAX_PITS_PER_SIDE as u32 * MAX_SEEDS_PER_PIT;

/// Pits per side in the classical game.
pub const DEFAULT_PITS_PER_SIDE: usize = 6;

/// Seeds per pit in the classical game.
pub const DEFAULT_SEEDS_PER_PIT: u32 = 6;

/// Shape of a board at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pits_per_side: usize,
    seeds_per_pit: u32,
}

impl BoardConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if either value is zero or above its maximum.
    #[instrument]
    pub fn new(pits_per_side: usize, seeds_per_pit: u32) -> Result<Self, SetupError> {
        let config = Self {
            pits_per_side,
            seeds_per_pit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that both values are within their supported ranges.
    ///
    /// Deserialized configurations skip [`BoardConfig::new`], so callers that
    /// read one from a file validate it here.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(1..=MAX_PITS_PER_SIDE).contains(&self.pits_per_side) {
            return Err(SetupError::PitsPerSide {
                pits: self.pits_per_side,
                max: MAX_PITS_PER_SIDE,
            });
        }
        if !(1..=MAX_SEEDS_PER_PIT).contains(&self.seeds_per_pit) {
            return Err(SetupError::SeedsPerPit {
                seeds: self.seeds_per_pit,
                max: MAX_SEEDS_PER_PIT,
            });
        }
        Ok(())
    }

    /// Number of regular pits on each side.
    pub fn pits_per_side(&self) -> usize {
        self.pits_per_side
    }

    /// Seeds placed in every regular pit at creation.
    pub fn seeds_per_pit(&self) -> u32 {
        self.seeds_per_pit
    }

    /// Returns a copy with a different seed count, validated.
    pub fn with_seeds_per_pit(self, seeds_per_pit: u32) -> Result<Self, SetupError> {
        Self::new(self.pits_per_side, seeds_per_pit)
    }

    /// Total seeds on a freshly created board.
    pub fn total_seeds(&self) -> u32 {
        // Bounded by 2 * MAX_PITS_PER_SIDE * MAX_SEEDS_PER_PIT.
        2 * self.pits_per_side as u32 * self.seeds_per_pit
    }

    pub(crate) fn with_pits_per_side(self, pits_per_side: usize) -> Self {
        Self {
            pits_per_side,
            ..self
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            pits_per_side: DEFAULT_PITS_PER_SIDE,
            seeds_per_pit: DEFAULT_SEEDS_PER_PIT,
        }
    }
}
