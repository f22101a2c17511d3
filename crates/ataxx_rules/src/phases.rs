//! Game phases: whose turn it is, or how the game ended.

use super::Player;
use serde::{Deserialize, Serialize};

/// State of the game as seen by the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Game is ongoing; the given player moves next.
    InProgress(Player),
    /// Game ended with a winner.
    Win(Player),
    /// Game ended with equal piece counts.
    Draw,
}

impl GameResult {
    /// The player to move, if the game is still running.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            GameResult::InProgress(player) => Some(*player),
            GameResult::Win(_) | GameResult::Draw => None,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win(player) => Some(*player),
            GameResult::InProgress(_) | GameResult::Draw => None,
        }
    }

    /// Returns true once the game has been won or drawn.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress(_))
    }
}

impl Default for GameResult {
    fn default() -> Self {
        GameResult::InProgress(Player::Black)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::InProgress(player) => write!(f, "{} to move", player),
            GameResult::Win(player) => write!(f, "{} wins", player),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}
