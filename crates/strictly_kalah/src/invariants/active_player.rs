//! Active player consistency between the status and the rows.

use super::Invariant;
use crate::{BoardState, Seat};
use strum::IntoEnumIterator;

/// Invariant: the status agrees with what is left on the board.
///
/// While the game is in progress both rows hold seeds, so the player to move
/// always has a legal move. Once it is over, every regular pit is empty.
pub struct ActivePlayerInvariant;

impl Invariant<BoardState> for ActivePlayerInvariant {
    fn holds(board: &BoardState) -> bool {
        if board.is_game_over() {
            Seat::iter().all(|seat| !board.seat_has_seeds(seat))
        } else {
            Seat::iter().all(|seat| board.seat_has_seeds(seat))
        }
    }

    fn description() -> &'static str {
        "Player to move has a legal move, and finished boards have empty rows"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSetup;

    #[test]
    fn test_finished_setup_holds() {
        let board = BoardSetup::new("Alice", "Bob")
            .rows(vec![0, 0], vec![1, 2])
            .start()
            .expect("valid setup");
        assert!(board.is_game_over());
        assert!(ActivePlayerInvariant::holds(&board));
    }

    #[test]
    fn test_exhausted_row_in_progress_violates() {
        let mut board = BoardSetup::new("Alice", "Bob")
            .rows(vec![1, 0], vec![1, 2])
            .start()
            .expect("valid setup");
        board.rows[Seat::First.index()][0] = 0;
        assert!(!ActivePlayerInvariant::holds(&board));
    }
}
