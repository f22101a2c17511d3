//! First-class action types for Ataxx.
//!
//! A move is a domain event: a piece leaves (or stays on) its origin and a
//! piece of the same colour lands on the destination.

use super::Coord;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a move treats its origin, decided by the Chebyshev distance travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum MoveKind {
    /// Distance 1: the origin keeps its piece.
    #[display("clone")]
    Clone,
    /// Distance 2: the origin is vacated.
    #[display("jump")]
    Jump,
}

impl MoveKind {
    /// Classifies a Chebyshev distance, `None` outside the movement range.
    #[instrument]
    pub fn from_distance(distance: usize) -> Option<Self> {
        match distance {
            1 => Some(MoveKind::Clone),
            2 => Some(MoveKind::Jump),
            _ => None,
        }
    }

    /// Chebyshev distance covered by this kind of move.
    pub fn distance(self) -> usize {
        match self {
            MoveKind::Clone => 1,
            MoveKind::Jump => 2,
        }
    }
}

/// A move from `origin` to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, new)]
pub struct Move {
    /// The cell the moving piece starts from.
    pub origin: Coord,
    /// The empty cell the mover's piece lands on.
    pub destination: Coord,
}

impl Move {
    /// Kind of move implied by the distance, `None` if out of range.
    pub fn kind(&self) -> Option<MoveKind> {
        MoveKind::from_distance(self.origin.chebyshev(self.destination))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}

/// Error that can occur when validating or applying a game operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// A coordinate lies outside the 7x7 grid.
    #[display("Coordinate ({}, {}) is outside the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The move or selection violates ownership, range or selection rules.
    #[display("Illegal move: {}", _0)]
    IllegalMove(String),

    /// There is no selection to clear or move from.
    #[display("No active selection")]
    NoActiveSelection,

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// A postcondition failed after applying a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_distance() {
        let origin = Coord::new(3, 3).unwrap();
        let clone = Move::new(origin, Coord::new(2, 4).unwrap());
        let jump = Move::new(origin, Coord::new(5, 1).unwrap());
        let far = Move::new(origin, Coord::new(0, 3).unwrap());

        assert_eq!(clone.kind(), Some(MoveKind::Clone));
        assert_eq!(jump.kind(), Some(MoveKind::Jump));
        assert_eq!(far.kind(), None);
    }

    #[test]
    fn test_display() {
        let mv = Move::new(Coord::new(0, 0).unwrap(), Coord::new(0, 2).unwrap());
        assert_eq!(mv.to_string(), "0,0 -> 0,2");
        assert_eq!(
            GameError::OutOfBounds { row: 9, col: 1 }.to_string(),
            "Coordinate (9, 1) is outside the board"
        );
    }
}
