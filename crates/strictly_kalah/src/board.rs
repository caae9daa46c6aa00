//! Board state for one Kalah game.

use crate::config::BoardConfig;
use crate::layout::Slot;
use crate::types::{BoardId, GameStatus, PlayerName, Seat, Winner};
use std::fmt;
use strum::IntoEnumIterator;

/// Complete state of one game: pits, stores and status.
///
/// A `BoardState` is a value. The turn engine never edits one in place; it
/// clones the input and returns the successor, so a state that has been
/// handed out is never observed half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub(crate) id: BoardId,
    pub(crate) config: BoardConfig,
    pub(crate) participants: [PlayerName; 2],
    pub(crate) rows: [Vec<u32>; 2],
    pub(crate) stores: [u32; 2],
    pub(crate) status: GameStatus,
    pub(crate) turn_num: u32,
    pub(crate) initial_seeds: u32,
}

impl BoardState {
    /// Creates a fresh board with both rows at the configured seed count and
    /// the first participant to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SetupError`] if the configuration is invalid, a name
    /// is blank, or both participants are the same player.
    pub fn new(
        id: BoardId,
        first: PlayerName,
        second: PlayerName,
        config: BoardConfig,
    ) -> Result<Self, crate::SetupError> {
        crate::BoardSetup::new(first, second)
            .id(id)
            .config(config)
            .start()
    }

    /// Board identifier.
    pub fn id(&self) -> &BoardId {
        &self.id
    }

    /// Configuration the board was created with.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Both participants, first seat first.
    pub fn participants(&self) -> &[PlayerName; 2] {
        &self.participants
    }

    /// Player sitting in the given seat.
    pub fn player(&self, seat: Seat) -> &PlayerName {
        &self.participants[seat.index()]
    }

    /// Seat of the given player, if they participate.
    pub fn seat_of(&self, player: &PlayerName) -> Option<Seat> {
        Seat::iter().find(|seat| self.player(*seat) == player)
    }

    /// Returns true if the player is one of the two participants.
    pub fn is_participant(&self, player: &PlayerName) -> bool {
        self.seat_of(player).is_some()
    }

    /// Regular pit row of a seat, in sowing order.
    pub fn row_of(&self, seat: Seat) -> &[u32] {
        &self.rows[seat.index()]
    }

    /// Store total of a seat.
    pub fn store_of(&self, seat: Seat) -> u32 {
        self.stores[seat.index()]
    }

    /// Regular pit row of a player.
    pub fn row(&self, player: &PlayerName) -> Option<&[u32]> {
        self.seat_of(player).map(|seat| self.row_of(seat))
    }

    /// Seeds in one of a player's regular pits.
    pub fn seeds(&self, player: &PlayerName, index: usize) -> Option<u32> {
        self.row(player)?.get(index).copied()
    }

    /// Store total of a player.
    pub fn store(&self, player: &PlayerName) -> Option<u32> {
        self.seat_of(player).map(|seat| self.store_of(seat))
    }

    /// Returns true if the player has at least one non-empty regular pit.
    pub fn has_seeds(&self, player: &PlayerName) -> bool {
        self.seat_of(player)
            .is_some_and(|seat| self.seat_has_seeds(seat))
    }

    /// Returns true if the seat has at least one non-empty regular pit.
    pub fn seat_has_seeds(&self, seat: Seat) -> bool {
        self.row_of(seat).iter().any(|&seeds| seeds > 0)
    }

    /// Pits the player to move may choose from. Empty once the game is over.
    pub fn legal_pits(&self) -> Vec<usize> {
        match self.active_seat() {
            Some(seat) => self
                .row_of(seat)
                .iter()
                .enumerate()
                .filter(|(_, seeds)| **seeds > 0)
                .map(|(index, _)| index)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Current status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Seat to move, absent once the game is over.
    pub fn active_seat(&self) -> Option<Seat> {
        match self.status {
            GameStatus::InProgress { to_move } => Some(to_move),
            GameStatus::Won(_) | GameStatus::Draw => None,
        }
    }

    /// Player to move, absent once the game is over.
    pub fn active_player(&self) -> Option<&PlayerName> {
        self.active_seat().map(|seat| self.player(seat))
    }

    /// Returns true once the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.status.is_finished()
    }

    /// Final result, present only once the game is over.
    pub fn winner(&self) -> Option<Winner> {
        match self.status {
            GameStatus::InProgress { .. } => None,
            GameStatus::Won(seat) => Some(Winner::Player(self.player(seat).clone())),
            GameStatus::Draw => Some(Winner::Draw),
        }
    }

    /// Number of successfully applied moves.
    pub fn turn_num(&self) -> u32 {
        self.turn_num
    }

    /// Seed total recorded at creation.
    pub fn initial_seeds(&self) -> u32 {
        self.initial_seeds
    }

    /// Seeds currently on the board, pits and stores together.
    pub fn total_seeds(&self) -> u32 {
        self.rows.iter().flatten().sum::<u32>() + self.stores.iter().sum::<u32>()
    }

    pub(crate) fn slot_mut(&mut self, slot: Slot) -> &mut u32 {
        match slot {
            Slot::Pit { seat, index } => &mut self.rows[seat.index()][index],
            Slot::Store(seat) => &mut self.stores[seat.index()],
        }
    }

    /// Moves every remaining regular-pit seed into its owner's store.
    pub(crate) fn sweep(&mut self) {
        for seat in Seat::iter() {
            let swept: u32 = self.rows[seat.index()].iter_mut().map(std::mem::take).sum();
            self.stores[seat.index()] += swept;
        }
    }

    /// Ends the game if either row is exhausted, returning the final status.
    pub(crate) fn finish_if_exhausted(&mut self) -> Option<GameStatus> {
        if Seat::iter().all(|seat| self.seat_has_seeds(seat)) {
            return None;
        }
        self.sweep();
        self.status = GameStatus::from_stores(self.stores);
        Some(self.status)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const GAP: &str = "      ";

        // Second seat on top, read right to left, store on the left.
        write!(f, "< {:2} >", self.store_of(Seat::Second))?;
        for seeds in self.row_of(Seat::Second).iter().rev() {
            write!(f, "[ {seeds:2} ]")?;
        }
        writeln!(f, "{GAP} @ {}", self.player(Seat::Second))?;

        write!(f, "{GAP}")?;
        for seeds in self.row_of(Seat::First) {
            write!(f, "[ {seeds:2} ]")?;
        }
        write!(f, "< {:2} >", self.store_of(Seat::First))?;
        write!(f, " @ {}", self.player(Seat::First))
    }
}
