//! Builder for boards, fresh or from an arbitrary position.

use crate::board::BoardState;
use crate::config::{BoardConfig, MAX_TOTAL_SEEDS};
use crate::error::SetupError;
use crate::types::{BoardId, GameStatus, PlayerName, Seat};
use tracing::{debug, instrument};

/// Board in setup phase - ready to start.
///
/// Without [`BoardSetup::rows`] the board starts in the classical position
/// described by its [`BoardConfig`]. Custom rows and stores allow small or
/// mid-game positions, which is how snapshots are restored and how rules are
/// exercised on tiny boards.
#[derive(Debug, Clone)]
pub struct BoardSetup {
    id: Option<BoardId>,
    participants: [PlayerName; 2],
    config: BoardConfig,
    rows: Option<[Vec<u32>; 2]>,
    stores: [u32; 2],
    to_move: Seat,
    turn_num: u32,
}

impl BoardSetup {
    /// Starts a setup for two participants; the first one moves first.
    pub fn new(first: impl Into<PlayerName>, second: impl Into<PlayerName>) -> Self {
        Self {
            id: None,
            participants: [first.into(), second.into()],
            config: BoardConfig::default(),
            rows: None,
            stores: [0, 0],
            to_move: Seat::First,
            turn_num: 0,
        }
    }

    /// Uses a fixed identifier instead of a generated one.
    pub fn id(mut self, id: BoardId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets pit count and seeds per pit for a fresh board.
    pub fn config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses explicit row contents; the pit count follows the row length.
    pub fn rows(mut self, first: Vec<u32>, second: Vec<u32>) -> Self {
        self.rows = Some([first, second]);
        self
    }

    /// Sets both store totals.
    pub fn stores(mut self, first: u32, second: u32) -> Self {
        self.stores = [first, second];
        self
    }

    /// Chooses which seat moves first.
    pub fn to_move(mut self, seat: Seat) -> Self {
        self.to_move = seat;
        self
    }

    /// Sets the turn counter, for positions restored mid-game.
    pub fn turn_num(mut self, turn_num: u32) -> Self {
        self.turn_num = turn_num;
        self
    }

    /// Validates the setup and produces the starting board.
    ///
    /// A position in which either row is already empty starts finished: rows
    /// are swept into their stores and the larger store wins.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] on blank or identical names, an invalid
    /// configuration, rows of different lengths, more seeds than
    /// [`MAX_TOTAL_SEEDS`], or a turn counter at `u32::MAX`.
    #[instrument(skip(self), fields(first = %self.participants[0], second = %self.participants[1]))]
    pub fn start(self) -> Result<BoardState, SetupError> {
        let [first, second] = &self.participants;
        if first.is_blank() || second.is_blank() {
            return Err(SetupError::BlankName);
        }
        if first == second {
            return Err(SetupError::SameParticipant(first.clone()));
        }

        let (config, rows) = match self.rows {
            Some([first_row, second_row]) => {
                if second_row.len() != first_row.len() {
                    return Err(SetupError::RowLength {
                        seat: Seat::Second,
                        len: second_row.len(),
                        expected: first_row.len(),
                    });
                }
                let config = self.config.with_pits_per_side(first_row.len());
                config.validate()?;
                (config, [first_row, second_row])
            }
            None => {
                self.config.validate()?;
                let row = vec![self.config.seeds_per_pit(); self.config.pits_per_side()];
                (self.config, [row.clone(), row])
            }
        };

        let initial_seeds = rows
            .iter()
            .flatten()
            .chain(&self.stores)
            .try_fold(0u32, |total, &seeds| total.checked_add(seeds))
            .filter(|&total| total <= MAX_TOTAL_SEEDS)
            .ok_or(SetupError::SeedTotal {
                max: MAX_TOTAL_SEEDS,
            })?;
        if self.turn_num == u32::MAX {
            return Err(SetupError::TurnLimit(self.turn_num));
        }

        let mut board = BoardState {
            id: self.id.unwrap_or_else(BoardId::generate),
            config,
            participants: self.participants,
            rows,
            stores: self.stores,
            status: GameStatus::InProgress {
                to_move: self.to_move,
            },
            turn_num: self.turn_num,
            initial_seeds,
        };
        board.finish_if_exhausted();

        debug!(
            board_id = %board.id,
            pits = config.pits_per_side(),
            seeds = board.initial_seeds,
            status = ?board.status,
            "Board set up"
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Winner;

    #[test]
    fn test_fresh_board_uses_config() {
        let board = BoardSetup::new("Alice", "Bob")
            .config(BoardConfig::new(4, 3).expect("valid config"))
            .start()
            .expect("valid setup");
        assert_eq!(board.row_of(Seat::First), &[3, 3, 3, 3]);
        assert_eq!(board.row_of(Seat::Second), &[3, 3, 3, 3]);
        assert_eq!(board.initial_seeds(), 24);
    }

    #[test]
    fn test_same_participant_rejected() {
        let result = BoardSetup::new("Alice", "Alice").start();
        assert_eq!(
            result.unwrap_err(),
            SetupError::SameParticipant(PlayerName::from("Alice"))
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = BoardSetup::new("Alice", " ").start();
        assert_eq!(result.unwrap_err(), SetupError::BlankName);
    }

    #[test]
    fn test_mismatched_rows_rejected() {
        let result = BoardSetup::new("Alice", "Bob")
            .rows(vec![1, 2], vec![4, 5, 6])
            .start();
        assert!(matches!(result, Err(SetupError::RowLength { len: 3, expected: 2, .. })));
    }

    #[test]
    fn test_custom_rows_and_stores() {
        let board = BoardSetup::new("Alice", "Bob")
            .rows(vec![1, 2], vec![4, 5])
            .stores(3, 6)
            .start()
            .expect("valid setup");
        assert_eq!(board.config().pits_per_side(), 2);
        assert_eq!(board.store_of(Seat::First), 3);
        assert_eq!(board.store_of(Seat::Second), 6);
        assert_eq!(board.initial_seeds(), 21);
        assert_eq!(board.active_player(), Some(&PlayerName::from("Alice")));
    }

    #[test]
    fn test_overflowing_seed_total_rejected() {
        let result = BoardSetup::new("Alice", "Bob")
            .rows(vec![1, 1], vec![1, 1])
            .stores(u32::MAX - 1, 0)
            .start();
        assert_eq!(
            result.unwrap_err(),
            SetupError::SeedTotal {
                max: MAX_TOTAL_SEEDS
            }
        );
    }

    #[test]
    fn test_seed_total_above_limit_rejected() {
        let result = BoardSetup::new("Alice", "Bob")
            .rows(vec![MAX_TOTAL_SEEDS], vec![1])
            .start();
        assert!(matches!(result, Err(SetupError::SeedTotal { .. })));
    }

    #[test]
    fn test_seed_total_at_limit_accepted() {
        let board = BoardSetup::new("Alice", "Bob")
            .rows(vec![MAX_TOTAL_SEEDS - 1], vec![1])
            .start()
            .expect("valid setup");
        assert_eq!(board.initial_seeds(), MAX_TOTAL_SEEDS);
    }

    #[test]
    fn test_exhausted_turn_counter_rejected() {
        let result = BoardSetup::new("Alice", "Bob").turn_num(u32::MAX).start();
        assert_eq!(result.unwrap_err(), SetupError::TurnLimit(u32::MAX));
    }

    #[test]
    fn test_exhausted_position_starts_finished() {
        let board = BoardSetup::new("Alice", "Bob")
            .rows(vec![0, 0], vec![0, 0])
            .stores(1, 0)
            .start()
            .expect("valid setup");
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Some(Winner::Player("Alice".into())));
    }

    #[test]
    fn test_exhausted_side_sweeps_other_row() {
        let board = BoardSetup::new("Alice", "Bob")
            .rows(vec![0, 0], vec![2, 3])
            .stores(4, 0)
            .start()
            .expect("valid setup");
        assert!(board.is_game_over());
        assert_eq!(board.row_of(Seat::Second), &[0, 0]);
        assert_eq!(board.store_of(Seat::Second), 5);
        assert_eq!(board.winner(), Some(Winner::Player("Bob".into())));
    }
}
