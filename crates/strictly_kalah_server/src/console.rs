//! Terminal front end: hot-seat play and move-list replay.
//!
//! Both go through a [`BoardRegistry`], exactly as a network handler would.

use crate::registry::{BoardRegistry, RegistryError};
use std::io::{BufRead, Write};
use strictly_kalah::{BoardId, BoardSnapshot, BoardState, Winner};
use tracing::{debug, info, instrument, warn};

/// Runs a hot-seat game on `input`/`output` until it ends or input runs out.
///
/// Each line is read as a pit index for the player to move. Rejected moves
/// are reported and the same player is asked again.
///
/// Returns the winner, or `None` if input ended before the game did.
#[instrument(skip(registry, input, output))]
pub fn play<R: BufRead, W: Write>(
    registry: &BoardRegistry,
    id: &BoardId,
    mut input: R,
    mut output: W,
) -> anyhow::Result<Option<Winner>> {
    let mut board = registry.get(id)?;
    let mut line = String::new();

    loop {
        writeln!(output, "{board}")?;
        if let Some(winner) = board.winner() {
            writeln!(output, "Game over: {winner}")?;
            return Ok(Some(winner));
        }

        let Some(player) = board.active_player().cloned() else {
            return Ok(None);
        };
        write!(output, "{player}, choose a pit {:?}: ", board.legal_pits())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            info!("Input closed before the game ended");
            return Ok(None);
        }

        let pit = match line.trim().parse::<usize>() {
            Ok(pit) => pit,
            Err(e) => {
                debug!(input = line.trim(), error = %e, "Unparseable pit");
                writeln!(output, "Not a pit number: {:?}", line.trim())?;
                continue;
            }
        };

        match registry.apply_move(id, &player, pit) {
            Ok((next, outcome)) => {
                writeln!(output, "{outcome}")?;
                board = next;
            }
            Err(RegistryError::Move(e)) => {
                writeln!(output, "{e}")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Creates a board, plays `pits` in turn order and returns the final board.
///
/// Each pit is played by whichever participant is to move at that point, so
/// extra turns are followed naturally.
///
/// # Errors
///
/// Stops at the first move the engine refuses, including moves listed after
/// the game has ended.
#[instrument(skip(registry))]
pub fn replay(
    registry: &BoardRegistry,
    first: &str,
    second: &str,
    pits: &[usize],
) -> Result<BoardState, RegistryError> {
    let mut board = registry.create(first, second)?;
    for (ply, &pit) in pits.iter().enumerate() {
        let player = match board.active_player() {
            Some(player) => player.clone(),
            None => {
                warn!(ply, pit, "Move listed after the game ended");
                return Err(RegistryError::Move(strictly_kalah::MoveError::GameAlreadyOver));
            }
        };
        board = registry.apply_move(board.id(), &player, pit)?.0;
    }
    info!(board_id = %board.id(), turns = board.turn_num(), "Replay finished");
    Ok(board)
}

/// Renders a board as pretty JSON.
pub fn to_json(board: &BoardState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BoardSnapshot::from(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_kalah::{BoardConfig, PlayerName};

    #[test]
    fn test_replay_follows_extra_turns() {
        let registry = BoardRegistry::default();

        // Alice's pit 0 ends in her store, so she plays pit 2 as well.
        let board = replay(&registry, "Alice", "Bob", &[0, 2]).expect("legal replay");

        assert_eq!(board.turn_num(), 2);
        assert_eq!(board.active_player(), Some(&PlayerName::from("Bob")));
        assert_eq!(registry.get(board.id()), Ok(board));
    }

    #[test]
    fn test_replay_stops_at_rejected_move() {
        let registry = BoardRegistry::default();
        let result = replay(&registry, "Alice", "Bob", &[2, 9]);

        assert!(matches!(
            result,
            Err(RegistryError::Move(strictly_kalah::MoveError::InvalidPit { pit: 9, .. }))
        ));
    }

    #[test]
    fn test_play_until_game_over() {
        let registry = BoardRegistry::new(BoardConfig::new(1, 1).expect("valid config"));
        let board = registry.create("Alice", "Bob").expect("valid board");
        let mut output = Vec::new();

        let winner = play(&registry, board.id(), "x\n5\n0\n".as_bytes(), &mut output)
            .expect("io succeeds");

        let printed = String::from_utf8(output).expect("utf8 output");
        assert_eq!(winner, Some(Winner::Draw));
        assert!(printed.contains("Not a pit number"));
        assert!(printed.contains("out of range"));
        assert!(printed.contains("Game over: draw"));
    }

    #[test]
    fn test_play_stops_when_input_ends() {
        let registry = BoardRegistry::default();
        let board = registry.create("Alice", "Bob").expect("valid board");

        let winner = play(&registry, board.id(), "2\n".as_bytes(), Vec::new()).expect("io succeeds");

        assert_eq!(winner, None);
        assert_eq!(registry.get(board.id()).map(|b| b.turn_num()), Ok(1));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let registry = BoardRegistry::default();
        let board = registry.create("Alice", "Bob").expect("valid board");

        let json = to_json(&board).expect("serializable");
        assert!(json.contains("\"activePlayer\""));
        assert!(json.contains("\"regularPits\""));
    }
}
