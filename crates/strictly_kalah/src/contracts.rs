//! Contract-based validation for Kalah moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} move {Q}. Preconditions are checked in a fixed order and the first
//! failure wins, so callers always see the most fundamental reason a move was
//! refused.

use crate::action::{Move, MoveError};
use crate::invariants::{InvariantSet, InvariantViolation, KalahInvariants};
use crate::{BoardState, Seat};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// What a successful precondition check established.
    type Checked;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Checked, MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended. Yields the seat to move.
pub struct GameInProgress;

impl GameInProgress {
    /// Returns the seat to move, or [`MoveError::GameAlreadyOver`].
    pub fn check(board: &BoardState) -> Result<Seat, MoveError> {
        board.active_seat().ok_or(MoveError::GameAlreadyOver)
    }
}

/// Precondition: the turn counter can still advance.
pub struct TurnAvailable;

impl TurnAvailable {
    /// Fails if the board's turn counter is already at `u32::MAX`.
    pub fn check(board: &BoardState) -> Result<(), MoveError> {
        match board.turn_num().checked_add(1) {
            Some(_) => Ok(()),
            None => Err(MoveError::TurnLimit(board.turn_num())),
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails unless the move's player sits in `to_move`.
    pub fn check(mov: &Move, board: &BoardState, to_move: Seat) -> Result<(), MoveError> {
        if board.player(to_move) != &mov.player {
            Err(MoveError::NotYourTurn(mov.player.clone()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the pit index lies within the row.
pub struct PitInRange;

impl PitInRange {
    /// Fails unless the pit exists on this board.
    pub fn check(mov: &Move, board: &BoardState) -> Result<(), MoveError> {
        let pits = board.config().pits_per_side();
        if mov.pit >= pits {
            Err(MoveError::InvalidPit { pit: mov.pit, pits })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the chosen pit holds seeds.
pub struct PitNotEmpty;

impl PitNotEmpty {
    /// Fails if the mover's pit is empty.
    pub fn check(mov: &Move, board: &BoardState, to_move: Seat) -> Result<(), MoveError> {
        if board.row_of(to_move)[mov.pit] == 0 {
            Err(MoveError::EmptyPit(mov.pit))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: all of the above, in order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move and returns the mover's seat.
    #[instrument(skip(board), fields(board_id = %board.id()))]
    pub fn check(mov: &Move, board: &BoardState) -> Result<Seat, MoveError> {
        let to_move = GameInProgress::check(board)?;
        TurnAvailable::check(board)?;
        PlayersTurn::check(mov, board, to_move)?;
        PitInRange::check(mov, board)?;
        PitNotEmpty::check(mov, board, to_move)?;
        Ok(to_move)
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game not over
/// - Turn counter not exhausted
/// - Player's turn
/// - Pit in range
/// - Pit not empty
///
/// Postconditions:
/// - All board invariants hold
/// - Turn counter advanced by exactly one
/// - Identity and participants unchanged
pub struct MoveContract;

impl Contract<BoardState, Move> for MoveContract {
    type Checked = Seat;

    fn pre(board: &BoardState, action: &Move) -> Result<Seat, MoveError> {
        LegalMove::check(action, board)
    }

    fn post(before: &BoardState, after: &BoardState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = KalahInvariants::check_all(after).err().unwrap_or_default();

        if before.turn_num().checked_add(1) != Some(after.turn_num()) {
            violations.push(InvariantViolation::new("Turn counter advances by one per move"));
        }
        if after.id() != before.id() || after.participants() != before.participants() {
            violations.push(InvariantViolation::new("Board identity and participants are fixed"));
        }
        if after.initial_seeds() != before.initial_seeds() {
            violations.push(InvariantViolation::new("Seed total recorded at creation is fixed"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "Move postcondition failed");
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSetup;

    fn board() -> BoardState {
        BoardSetup::new("Alice", "Bob")
            .rows(vec![0, 2, 1], vec![1, 1, 1])
            .start()
            .expect("valid setup")
    }

    #[test]
    fn test_precondition_legal_move() {
        let action = Move::new("Alice".into(), 1);
        assert_eq!(MoveContract::pre(&board(), &action), Ok(Seat::First));
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let action = Move::new("Bob".into(), 0);
        assert_eq!(
            MoveContract::pre(&board(), &action),
            Err(MoveError::NotYourTurn("Bob".into()))
        );
    }

    #[test]
    fn test_precondition_stranger_is_not_their_turn() {
        let action = Move::new("Mallory".into(), 0);
        assert!(matches!(
            MoveContract::pre(&board(), &action),
            Err(MoveError::NotYourTurn(_))
        ));
    }

    #[test]
    fn test_precondition_pit_out_of_range() {
        let action = Move::new("Alice".into(), 3);
        assert_eq!(
            MoveContract::pre(&board(), &action),
            Err(MoveError::InvalidPit { pit: 3, pits: 3 })
        );
    }

    #[test]
    fn test_precondition_empty_pit() {
        let action = Move::new("Alice".into(), 0);
        assert_eq!(MoveContract::pre(&board(), &action), Err(MoveError::EmptyPit(0)));
    }

    #[test]
    fn test_turn_checked_before_pit_range() {
        // Wrong player and a bad pit: the turn check comes first.
        let action = Move::new("Bob".into(), 99);
        assert!(matches!(
            MoveContract::pre(&board(), &action),
            Err(MoveError::NotYourTurn(_))
        ));
    }

    #[test]
    fn test_game_over_checked_first() {
        let finished = BoardSetup::new("Alice", "Bob")
            .rows(vec![0, 0], vec![1, 0])
            .start()
            .expect("valid setup");
        let action = Move::new("Bob".into(), 99);
        assert_eq!(
            MoveContract::pre(&finished, &action),
            Err(MoveError::GameAlreadyOver)
        );
    }

    #[test]
    fn test_exhausted_turn_counter_refused() {
        let mut board = board();
        board.turn_num = u32::MAX;
        let action = Move::new("Alice".into(), 1);
        assert_eq!(
            MoveContract::pre(&board, &action),
            Err(MoveError::TurnLimit(u32::MAX))
        );
    }

    #[test]
    fn test_postcondition_detects_stalled_turn_counter() {
        let before = board();
        let after = before.clone();
        let violations = MoveContract::post(&before, &after).unwrap_err();
        assert_eq!(violations.len(), 1);
    }
}
