//! First-class invariants for Kalah boards.
//!
//! Invariants are logical properties that must hold for every published
//! board. The turn engine checks them as move postconditions, and each one
//! is testable on its own.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod active_player;
pub mod row_shape;
pub mod seed_conservation;

pub use active_player::ActivePlayerInvariant;
pub use row_shape::RowShapeInvariant;
pub use seed_conservation::SeedConservationInvariant;

/// All Kalah board invariants as a composable set.
pub type KalahInvariants = (
    SeedConservationInvariant,
    RowShapeInvariant,
    ActivePlayerInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSetup, BoardState, Seat};

    #[test]
    fn test_invariant_set_holds_for_fresh_board() {
        let board = BoardSetup::new("Alice", "Bob").start().expect("valid setup");
        assert!(KalahInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut board: BoardState = BoardSetup::new("Alice", "Bob").start().expect("valid setup");
        board.rows[Seat::First.index()].push(3);

        let violations = KalahInvariants::check_all(&board).unwrap_err();
        // A stray pit both changes the row shape and adds seeds.
        assert_eq!(violations.len(), 2);
    }
}
