//! The Kalah turn engine.
//!
//! A pure function from `(board, player, pit)` to the successor board. It
//! holds no state between calls, performs no I/O and never blocks; a move
//! costs one walk over at most `initial_seeds` slots.

use crate::action::{Move, MoveError, MoveOutcome, Sowing};
use crate::contracts::{Contract, MoveContract};
use crate::layout::{Slot, SowingCycle};
use crate::{BoardState, GameStatus, PlayerName, Seat};
use tracing::{debug, error, info, instrument};

/// Applies `player`'s move from `pit` to `board`.
///
/// The input board is never modified. On success the returned board is the
/// complete successor state; on failure nothing was sown.
///
/// # Errors
///
/// Returns the first failed precondition: [`MoveError::GameAlreadyOver`],
/// [`MoveError::TurnLimit`], [`MoveError::NotYourTurn`],
/// [`MoveError::InvalidPit`] or [`MoveError::EmptyPit`].
#[instrument(skip(board), fields(board_id = %board.id(), turn = board.turn_num()))]
pub fn apply_move(
    board: &BoardState,
    player: &PlayerName,
    pit: usize,
) -> Result<(BoardState, MoveOutcome), MoveError> {
    let action = Move::new(player.clone(), pit);
    let mover = MoveContract::pre(board, &action)?;

    let mut next = board.clone();
    let cycle = SowingCycle::new(mover, next.config.pits_per_side());

    let sown = std::mem::take(&mut next.rows[mover.index()][pit]);
    let mut last = Slot::Pit { seat: mover, index: pit };
    for slot in cycle.walk(pit, sown) {
        *next.slot_mut(slot) += 1;
        last = slot;
    }

    let sowing = match last {
        Slot::Store(seat) if seat == mover => Sowing::ExtraTurn,
        Slot::Pit { seat, index } if seat == mover && next.rows[seat.index()][index] == 1 => {
            capture(&mut next, mover, index)
        }
        Slot::Pit { .. } | Slot::Store(_) => Sowing::Plain,
    };

    next.turn_num += 1;
    let finished = next.finish_if_exhausted();
    if finished.is_none() {
        let to_move = match sowing {
            Sowing::ExtraTurn => mover,
            Sowing::Plain | Sowing::Capture { .. } => mover.opponent(),
        };
        next.status = GameStatus::InProgress { to_move };
    }

    if cfg!(debug_assertions) {
        if let Err(violations) = MoveContract::post(board, &next) {
            error!(?violations, "Turn engine produced an inconsistent board");
            debug_assert!(violations.is_empty(), "postcondition violated: {violations:?}");
        }
    }

    let outcome = MoveOutcome::new(mover, pit, sown, sowing, next.winner());
    debug!(
        mover = ?mover,
        sown,
        sowing = ?outcome.sowing,
        to_move = ?next.active_seat(),
        "Move applied"
    );
    if let Some(winner) = &outcome.finished {
        info!(
            %winner,
            first_store = next.store_of(Seat::First),
            second_store = next.store_of(Seat::Second),
            "Game finished"
        );
    }

    Ok((next, outcome))
}

/// Takes the last seed and the opposite pit into the mover's store, if the
/// opposite pit holds anything.
fn capture(board: &mut BoardState, mover: Seat, index: usize) -> Sowing {
    let opposite = board.config.pits_per_side() - 1 - index;
    let opponent = mover.opponent().index();

    let stolen = board.rows[opponent][opposite];
    if stolen == 0 {
        return Sowing::Plain;
    }

    board.rows[opponent][opposite] = 0;
    board.rows[mover.index()][index] = 0;
    let seeds = stolen + 1;
    board.stores[mover.index()] += seeds;
    debug!(pit = index, opposite, seeds, "Captured");

    Sowing::Capture { pit: index, seeds }
}
