//! Board snapshots exchanged with callers and persistence.
//!
//! The wire shape keys rows and stores by player name:
//!
//! ```json
//! {
//!   "id": "…",
//!   "turnNum": 1,
//!   "gameOver": false,
//!   "winner": null,
//!   "activePlayer": { "name": "Bob" },
//!   "bigPits": { "Alice": 1, "Bob": 0 },
//!   "regularPits": { "Alice": [6, 6, 0, 7, 7, 7], "Bob": [7, 7, 6, 6, 6, 6] },
//!   "participants": ["Alice", "Bob"],
//!   "seedsPerPit": 6
//! }
//! ```
//!
//! A draw is `gameOver: true` with `winner: null`.

use crate::board::BoardState;
use crate::config::BoardConfig;
use crate::error::SetupError;
use crate::setup::BoardSetup;
use crate::types::{BoardId, GameStatus, PlayerName, Seat, Winner};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{instrument, warn};

/// A player reference as it appears in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPlayer {
    /// Player name.
    pub name: PlayerName,
}

/// Serializable view of a [`BoardState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// Board identifier.
    pub id: BoardId,
    /// Moves applied so far.
    pub turn_num: u32,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Winning player; null while in progress and on a draw.
    pub winner: Option<NamedPlayer>,
    /// Player to move; null once the game is over.
    pub active_player: Option<NamedPlayer>,
    /// Store totals by player.
    pub big_pits: BTreeMap<PlayerName, u32>,
    /// Regular pit rows by player.
    pub regular_pits: BTreeMap<PlayerName, Vec<u32>>,
    /// Participants in seat order.
    pub participants: [PlayerName; 2],
    /// Seeds per pit the board was created with.
    #[serde(default = "default_seeds_per_pit")]
    pub seeds_per_pit: u32,
}

fn default_seeds_per_pit() -> u32 {
    BoardConfig::default().seeds_per_pit()
}

/// Error restoring a board from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SnapshotError {
    /// A participant has no row or store in the snapshot.
    #[display("Snapshot has no {field} entry for {player}")]
    MissingEntry {
        /// Player lacking an entry.
        player: PlayerName,
        /// `regularPits` or `bigPits`.
        field: &'static str,
    },

    /// Rows or stores are keyed by someone who is not a participant.
    #[display("Snapshot has an entry for non-participant {_0}")]
    UnknownPlayer(PlayerName),

    /// `gameOver`, `activePlayer` and `winner` disagree with each other or
    /// with the board contents.
    #[display("Snapshot status is inconsistent: {_0}")]
    InconsistentStatus(String),

    /// The position itself is not a valid board.
    #[display("Snapshot is not a valid board: {_0}")]
    Setup(SetupError),
}

impl From<SetupError> for SnapshotError {
    fn from(err: SetupError) -> Self {
        SnapshotError::Setup(err)
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Setup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<&BoardState> for BoardSnapshot {
    fn from(board: &BoardState) -> Self {
        let named = |player: &PlayerName| NamedPlayer {
            name: player.clone(),
        };
        let winner = match board.status() {
            GameStatus::Won(seat) => Some(named(board.player(*seat))),
            GameStatus::InProgress { .. } | GameStatus::Draw => None,
        };

        Self {
            id: board.id().clone(),
            turn_num: board.turn_num(),
            game_over: board.is_game_over(),
            winner,
            active_player: board.active_player().map(named),
            big_pits: Seat::iter()
                .map(|seat| (board.player(seat).clone(), board.store_of(seat)))
                .collect(),
            regular_pits: Seat::iter()
                .map(|seat| (board.player(seat).clone(), board.row_of(seat).to_vec()))
                .collect(),
            participants: board.participants().clone(),
            seeds_per_pit: board.config().seeds_per_pit(),
        }
    }
}

impl From<BoardState> for BoardSnapshot {
    fn from(board: BoardState) -> Self {
        Self::from(&board)
    }
}

impl TryFrom<BoardSnapshot> for BoardState {
    type Error = SnapshotError;

    #[instrument(skip(snapshot), fields(board_id = %snapshot.id))]
    fn try_from(mut snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let [first, second] = snapshot.participants.clone();

        for player in snapshot.big_pits.keys().chain(snapshot.regular_pits.keys()) {
            if player != &first && player != &second {
                warn!(%player, "Snapshot entry for non-participant");
                return Err(SnapshotError::UnknownPlayer(player.clone()));
            }
        }

        let mut take_row = |player: &PlayerName| {
            snapshot
                .regular_pits
                .remove(player)
                .ok_or_else(|| SnapshotError::MissingEntry {
                    player: player.clone(),
                    field: "regularPits",
                })
        };
        let first_row = take_row(&first)?;
        let second_row = take_row(&second)?;

        let store = |player: &PlayerName| {
            snapshot
                .big_pits
                .get(player)
                .copied()
                .ok_or_else(|| SnapshotError::MissingEntry {
                    player: player.clone(),
                    field: "bigPits",
                })
        };
        let first_store = store(&first)?;
        let second_store = store(&second)?;

        let to_move = match &snapshot.active_player {
            Some(active) if active.name == first => Seat::First,
            Some(active) if active.name == second => Seat::Second,
            Some(active) => return Err(SnapshotError::UnknownPlayer(active.name.clone())),
            None => Seat::First,
        };

        let config = BoardConfig::default().with_seeds_per_pit(snapshot.seeds_per_pit)?;
        let board = BoardSetup::new(first, second)
            .id(snapshot.id.clone())
            .config(config)
            .rows(first_row, second_row)
            .stores(first_store, second_store)
            .to_move(to_move)
            .turn_num(snapshot.turn_num)
            .start()?;

        check_status(&board, &snapshot)?;
        Ok(board)
    }
}

/// Compares the declared status with the one implied by the position.
fn check_status(board: &BoardState, snapshot: &BoardSnapshot) -> Result<(), SnapshotError> {
    let declared_winner = snapshot.winner.as_ref().map(|named| &named.name);
    let consistent = match (snapshot.game_over, board.winner()) {
        (false, None) => snapshot.active_player.is_some() && declared_winner.is_none(),
        (true, Some(Winner::Player(winner))) => {
            snapshot.active_player.is_none() && declared_winner == Some(&winner)
        }
        (true, Some(Winner::Draw)) => {
            snapshot.active_player.is_none() && declared_winner.is_none()
        }
        (false, Some(_)) | (true, None) => false,
    };

    if consistent {
        Ok(())
    } else {
        warn!(game_over = snapshot.game_over, status = ?board.status(), "Snapshot status mismatch");
        Err(SnapshotError::InconsistentStatus(format!(
            "declared game_over={}, winner={:?}, active={:?}; position implies {:?}",
            snapshot.game_over,
            declared_winner,
            snapshot.active_player.as_ref().map(|named| &named.name),
            board.status()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TOTAL_SEEDS;
    use crate::engine::apply_move;
    use serde_json::json;

    fn opening() -> BoardState {
        let board = BoardSetup::new("Alice", "Bob")
            .id(BoardId::from("b1"))
            .start()
            .expect("valid setup");
        apply_move(&board, &"Alice".into(), 2).expect("legal move").0
    }

    #[test]
    fn test_snapshot_json_shape() {
        let value = serde_json::to_value(BoardSnapshot::from(&opening())).expect("serializable");
        assert_eq!(
            value,
            json!({
                "id": "b1",
                "turnNum": 1,
                "gameOver": false,
                "winner": null,
                "activePlayer": { "name": "Bob" },
                "bigPits": { "Alice": 1, "Bob": 0 },
                "regularPits": {
                    "Alice": [6, 6, 0, 7, 7, 7],
                    "Bob": [7, 7, 6, 6, 6, 6]
                },
                "participants": ["Alice", "Bob"],
                "seedsPerPit": 6
            })
        );
    }

    #[test]
    fn test_restore_in_progress_board() {
        let board = opening();
        let restored = BoardState::try_from(BoardSnapshot::from(&board)).expect("restorable");
        assert_eq!(restored.row_of(Seat::First), board.row_of(Seat::First));
        assert_eq!(restored.active_seat(), Some(Seat::Second));
        assert_eq!(restored.turn_num(), 1);
    }

    #[test]
    fn test_restore_draw() {
        let board = BoardSetup::new("Alice", "Bob")
            .rows(vec![0, 0], vec![0, 0])
            .stores(3, 3)
            .start()
            .expect("valid setup");
        let snapshot = BoardSnapshot::from(&board);
        assert!(snapshot.game_over);
        assert_eq!(snapshot.winner, None);

        let restored = BoardState::try_from(snapshot).expect("restorable");
        assert_eq!(restored.winner(), Some(Winner::Draw));
    }

    #[test]
    fn test_restore_rejects_wrong_winner() {
        let board = BoardSetup::new("Alice", "Bob")
            .rows(vec![0, 0], vec![0, 0])
            .stores(5, 3)
            .start()
            .expect("valid setup");
        let mut snapshot = BoardSnapshot::from(&board);
        snapshot.winner = Some(NamedPlayer { name: "Bob".into() });

        assert!(matches!(
            BoardState::try_from(snapshot),
            Err(SnapshotError::InconsistentStatus(_))
        ));
    }

    #[test]
    fn test_restore_rejects_unknown_key() {
        let mut snapshot = BoardSnapshot::from(&opening());
        snapshot.big_pits.insert("Mallory".into(), 0);

        assert_eq!(
            BoardState::try_from(snapshot),
            Err(SnapshotError::UnknownPlayer("Mallory".into()))
        );
    }

    #[test]
    fn test_restore_rejects_missing_row() {
        let mut snapshot = BoardSnapshot::from(&opening());
        snapshot.regular_pits.remove(&PlayerName::from("Bob"));

        assert!(matches!(
            BoardState::try_from(snapshot),
            Err(SnapshotError::MissingEntry { field: "regularPits", .. })
        ));
    }

    fn snapshot_json(alice_row: u32, turn_num: u32) -> BoardSnapshot {
        serde_json::from_value(json!({
            "id": "b2",
            "turnNum": turn_num,
            "gameOver": false,
            "winner": null,
            "activePlayer": { "name": "Alice" },
            "bigPits": { "Alice": 0, "Bob": 0 },
            "regularPits": { "Alice": [alice_row], "Bob": [1] },
            "participants": ["Alice", "Bob"]
        }))
        .expect("well-formed snapshot")
    }

    #[test]
    fn test_restore_rejects_oversized_seed_total() {
        assert_eq!(
            BoardState::try_from(snapshot_json(u32::MAX, 0)),
            Err(SnapshotError::Setup(SetupError::SeedTotal {
                max: MAX_TOTAL_SEEDS
            }))
        );
    }

    #[test]
    fn test_restore_rejects_exhausted_turn_counter() {
        assert_eq!(
            BoardState::try_from(snapshot_json(1, u32::MAX)),
            Err(SnapshotError::Setup(SetupError::TurnLimit(u32::MAX)))
        );
    }

    #[test]
    fn test_restored_board_at_last_turn_still_playable() {
        let board = BoardState::try_from(snapshot_json(1, u32::MAX - 1)).expect("restorable");
        let (next, _) = apply_move(&board, &"Alice".into(), 0).expect("legal move");
        assert_eq!(next.turn_num(), u32::MAX);
    }

    #[test]
    fn test_restore_rejects_over_with_seeds_left() {
        let mut snapshot = BoardSnapshot::from(&opening());
        snapshot.game_over = true;
        snapshot.active_player = None;

        assert!(matches!(
            BoardState::try_from(snapshot),
            Err(SnapshotError::InconsistentStatus(_))
        ));
    }
}
