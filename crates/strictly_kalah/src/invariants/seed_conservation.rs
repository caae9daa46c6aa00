//! Seed conservation: seeds are never created or destroyed.

use super::Invariant;
use crate::BoardState;

/// Invariant: pits and stores together always hold the creation total.
pub struct SeedConservationInvariant;

impl Invariant<BoardState> for SeedConservationInvariant {
    fn holds(board: &BoardState) -> bool {
        board.total_seeds() == board.initial_seeds()
    }

    fn description() -> &'static str {
        "Pits and stores hold the same number of seeds as at creation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSetup, Seat};

    #[test]
    fn test_fresh_board_holds() {
        let board = BoardSetup::new("Alice", "Bob").start().expect("valid setup");
        assert!(SeedConservationInvariant::holds(&board));
    }

    #[test]
    fn test_lost_seed_violates() {
        let mut board = BoardSetup::new("Alice", "Bob").start().expect("valid setup");
        board.rows[Seat::Second.index()][0] -= 1;
        assert!(!SeedConservationInvariant::holds(&board));
    }
}
