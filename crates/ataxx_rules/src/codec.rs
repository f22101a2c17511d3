//! Save-file codec.
//!
//! A snapshot is five `key: value` lines in fixed order:
//!
//! ```text
//! black: 18014398509481985
//! white: 281474976710720
//! steps: 0
//! seconds: 0
//! game_state: 0
//! ```
//!
//! The two masks set bit `row * 8 + col` for every occupied cell. Selection
//! state is never written.

use super::{Board, Cell, Coord, GameResult, GameSession, Player};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Keys of the save format, in file order.
pub const KEYS: [&str; 5] = ["black", "white", "steps", "seconds", "game_state"];

/// Bits of the stride-8 mask that map onto the 7x7 grid.
pub const GRID_MASK: u64 = 0x007f_7f7f_7f7f_7f7f;

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Persistence error: {} at {}:{}", message, file, line)]
pub struct PersistenceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PersistenceError {
    /// Creates a new persistence error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Integer code of a result in the save format.
pub fn result_code(result: GameResult) -> u8 {
    match result {
        GameResult::InProgress(Player::Black) => 0,
        GameResult::InProgress(Player::White) => 1,
        GameResult::Win(Player::White) => 2,
        GameResult::Win(Player::Black) => 3,
        GameResult::Draw => 4,
    }
}

/// Result for a save-format code, `None` for unknown codes.
pub fn result_from_code(code: u8) -> Option<GameResult> {
    match code {
        0 => Some(GameResult::InProgress(Player::Black)),
        1 => Some(GameResult::InProgress(Player::White)),
        2 => Some(GameResult::Win(Player::White)),
        3 => Some(GameResult::Win(Player::Black)),
        4 => Some(GameResult::Draw),
        _ => None,
    }
}

/// A persisted session: board masks, counters and result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Snapshot {
    /// Occupancy mask of black pieces.
    black: u64,
    /// Occupancy mask of white pieces.
    white: u64,
    /// Moves executed.
    steps: u32,
    /// Elapsed seconds.
    seconds: u32,
    /// Game result.
    result: GameResult,
}

impl Snapshot {
    /// Captures the persistent part of a session.
    #[instrument(skip(session))]
    pub fn capture(session: &GameSession) -> Self {
        let mut black = 0u64;
        let mut white = 0u64;
        for (coord, cell) in session.board().cells() {
            match cell {
                Cell::Owned(Player::Black) => black |= 1u64 << coord.bit(),
                Cell::Owned(Player::White) => white |= 1u64 << coord.bit(),
                Cell::Empty => {}
            }
        }
        Self {
            black,
            white,
            steps: session.move_count(),
            seconds: session.elapsed_seconds(),
            result: session.result(),
        }
    }

    /// Rebuilds the board from the masks.
    ///
    /// Rejects bits outside the 7x7 grid and cells claimed by both players.
    #[instrument(skip(self))]
    pub fn board(&self) -> Result<Board, PersistenceError> {
        let stray = (self.black | self.white) & !GRID_MASK;
        if stray != 0 {
            return Err(PersistenceError::new(format!(
                "mask bits outside the board: {:#x}",
                stray
            )));
        }
        let both = self.black & self.white;
        if both != 0 {
            return Err(PersistenceError::new(format!(
                "cells owned by both players: {:#x}",
                both
            )));
        }

        let mut board = Board::new();
        for coord in Coord::all() {
            let bit = 1u64 << coord.bit();
            if self.black & bit != 0 {
                board.put(coord, Cell::Owned(Player::Black));
            } else if self.white & bit != 0 {
                board.put(coord, Cell::Owned(Player::White));
            }
        }
        Ok(board)
    }

    /// Renders the snapshot in the save format, one line per key.
    pub fn encode(&self) -> String {
        let values = [
            self.black.to_string(),
            self.white.to_string(),
            self.steps.to_string(),
            self.seconds.to_string(),
            result_code(self.result).to_string(),
        ];
        KEYS.iter()
            .zip(values)
            .map(|(key, value)| format!("{}: {}\n", key, value))
            .collect()
    }

    /// Parses the save format.
    ///
    /// Blank lines and surrounding whitespace are tolerated; keys must
    /// appear exactly once, in order.
    #[instrument(skip(text))]
    pub fn decode(text: &str) -> Result<Self, PersistenceError> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
        let mut values = [0u64; 5];
        for (key, slot) in KEYS.iter().zip(values.iter_mut()) {
            let line = lines
                .next()
                .ok_or_else(|| PersistenceError::new(format!("missing `{}` line", key)))?;
            let (found, value) = line
                .split_once(':')
                .ok_or_else(|| PersistenceError::new(format!("malformed line `{}`", line)))?;
            if found.trim() != *key {
                return Err(PersistenceError::new(format!(
                    "expected `{}`, found `{}`",
                    key,
                    found.trim()
                )));
            }
            *slot = value.trim().parse().map_err(|e| {
                PersistenceError::new(format!("bad value for `{}`: {}", key, e))
            })?;
        }
        if let Some(extra) = lines.next() {
            return Err(PersistenceError::new(format!("unexpected trailing line `{}`", extra)));
        }

        let [black, white, steps, seconds, code] = values;
        let counter = |name: &str, value: u64| {
            u32::try_from(value)
                .map_err(|_| PersistenceError::new(format!("`{}` out of range: {}", name, value)))
        };
        let result = u8::try_from(code)
            .ok()
            .and_then(result_from_code)
            .ok_or_else(|| PersistenceError::new(format!("unknown game_state {}", code)))?;

        let snapshot = Self {
            black,
            white,
            steps: counter("steps", steps)?,
            seconds: counter("seconds", seconds)?,
            result,
        };
        snapshot.board()?;
        debug!(?snapshot, "Snapshot decoded");
        Ok(snapshot)
    }

    /// Builds a session from the snapshot: no selection, timer enabled.
    #[instrument(skip(self))]
    pub fn into_session(self) -> Result<GameSession, PersistenceError> {
        let board = self.board()?;
        Ok(GameSession::from_parts(
            board,
            self.result,
            self.steps,
            self.seconds,
            true,
        ))
    }
}

impl GameSession {
    /// Writes the session snapshot to `path`.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let snapshot = Snapshot::capture(self);
        std::fs::write(path.as_ref(), snapshot.encode())?;
        info!(steps = self.move_count(), "Game saved");
        Ok(())
    }

    /// Replaces this session with the snapshot stored at `path`.
    ///
    /// On any error the session keeps its previous state.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            warn!(error = %e, "Save file unreadable");
            PersistenceError::new(format!("cannot read save file: {}", e))
        })?;
        let snapshot = Snapshot::decode(&text).inspect_err(|e| {
            warn!(error = %e, "Save file rejected");
        })?;
        self.restore(snapshot)
    }

    /// Replaces this session with `snapshot`.
    #[instrument(skip(self))]
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), PersistenceError> {
        *self = snapshot.into_session()?;
        info!(steps = self.move_count(), result = %self.result(), "Game loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_masks() {
        let snapshot = Snapshot::capture(&GameSession::new());
        assert_eq!(*snapshot.black(), 1u64 | 1 << 54);
        assert_eq!(*snapshot.white(), 1u64 << 6 | 1 << 48);
        assert_eq!(
            snapshot.encode(),
            "black: 18014398509481985\nwhite: 281474976710720\nsteps: 0\nseconds: 0\ngame_state: 0\n"
        );
    }

    #[test]
    fn test_result_codes_are_bijective() {
        for code in 0..5 {
            let result = result_from_code(code).unwrap();
            assert_eq!(result_code(result), code);
        }
        assert_eq!(result_from_code(5), None);
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        let text = "  black: 1\n\nwhite:64\nsteps: 3 \nseconds: 12\ngame_state: 1";
        let snapshot = Snapshot::decode(text).unwrap();
        assert_eq!(snapshot, Snapshot::new(1, 64, 3, 12, GameResult::InProgress(Player::White)));
    }

    #[test]
    fn test_decode_rejects_overlap() {
        let text = "black: 1\nwhite: 1\nsteps: 0\nseconds: 0\ngame_state: 0\n";
        assert!(Snapshot::decode(text).unwrap_err().message.contains("both players"));
    }

    #[test]
    fn test_decode_rejects_unused_bits() {
        let text = "black: 128\nwhite: 0\nsteps: 0\nseconds: 0\ngame_state: 0\n";
        assert!(Snapshot::decode(text).unwrap_err().message.contains("outside the board"));
    }

    #[test]
    fn test_decode_rejects_reordered_keys() {
        let text = "white: 0\nblack: 0\nsteps: 0\nseconds: 0\ngame_state: 0\n";
        assert!(Snapshot::decode(text).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_state_and_values() {
        assert!(Snapshot::decode("black: 0\nwhite: 0\nsteps: 0\nseconds: 0\ngame_state: 9\n").is_err());
        assert!(Snapshot::decode("black: x\nwhite: 0\nsteps: 0\nseconds: 0\ngame_state: 0\n").is_err());
        assert!(Snapshot::decode("black: 0\nwhite: 0\nsteps: -1\nseconds: 0\ngame_state: 0\n").is_err());
        assert!(Snapshot::decode("black: 0\nwhite: 0\nsteps: 0\n").is_err());
        assert!(Snapshot::decode("").is_err());
    }

    #[test]
    fn test_restore_enables_timer_and_clears_selection() {
        let mut finished = GameSession::blank();
        let snapshot = Snapshot::new(1, 0, 7, 30, GameResult::Win(Player::Black));
        finished.restore(snapshot).unwrap();
        assert!(finished.timer_enabled());
        assert!(finished.selection().is_none());
        assert_eq!(finished.result(), GameResult::Win(Player::Black));
        // Terminal games do not count time even with the flag set.
        assert!(!finished.tick());
    }
}
