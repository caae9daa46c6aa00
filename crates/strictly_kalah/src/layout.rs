//! Sowing order around the board.
//!
//! Each seat sows along its own cycle of `2 * pits + 1` slots: its own pits in
//! index order, its own store, then the opponent's pits in index order. The
//! opponent's store never appears in the table, so skipping it costs nothing
//! during the walk.

use crate::types::Seat;
use std::iter;

/// One seed-holding cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A regular pit.
    Pit {
        /// Owner of the pit.
        seat: Seat,
        /// Index within the owner's row.
        index: usize,
    },
    /// A store.
    Store(Seat),
}

/// Precomputed visiting order for one sowing seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SowingCycle {
    mover: Seat,
    slots: Vec<Slot>,
}

impl SowingCycle {
    /// Builds the cycle for a seat on a board with `pits` pits per side.
    pub fn new(mover: Seat, pits: usize) -> Self {
        let own = (0..pits).map(move |index| Slot::Pit { seat: mover, index });
        let theirs = (0..pits).map(move |index| Slot::Pit {
            seat: mover.opponent(),
            index,
        });
        let slots = own.chain(iter::once(Slot::Store(mover))).chain(theirs).collect();
        Self { mover, slots }
    }

    /// Seat this cycle sows for.
    pub fn mover(&self) -> Seat {
        self.mover
    }

    /// Number of slots in one lap.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; every cycle holds at least the mover's store.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots visited in order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slots receiving one seed each when `seeds` are picked up from the
    /// mover's pit `from`.
    ///
    /// The mover's own pits occupy the first positions of the table, so pit
    /// `from` sits at position `from`; the walk starts one past it.
    pub fn walk(&self, from: usize, seeds: u32) -> impl Iterator<Item = Slot> + '_ {
        let len = self.slots.len();
        (1..=seeds as usize).map(move |step| self.slots[(from + step) % len])
    }
}
