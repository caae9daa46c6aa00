//! Row shape: both rows have exactly the configured number of pits.

use super::Invariant;
use crate::{BoardState, Seat};
use strum::IntoEnumIterator;

/// Invariant: every row has `pits_per_side` entries.
pub struct RowShapeInvariant;

impl Invariant<BoardState> for RowShapeInvariant {
    fn holds(board: &BoardState) -> bool {
        let pits = board.config().pits_per_side();
        Seat::iter().all(|seat| board.row_of(seat).len() == pits)
    }

    fn description() -> &'static str {
        "Each participant's row has exactly pits_per_side pits"
    }
}
