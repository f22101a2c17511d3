//! Selection consistency: the overlay always describes the current board.

use super::super::{Cell, GameSession, Reach};
use super::Invariant;

/// Invariant: an active selection matches the board it was derived from.
///
/// The origin holds a piece of the player to move, and every tagged cell is
/// empty and sits at the distance its tag claims. No reachable empty cell is
/// missing from the overlay.
pub struct SelectionConsistentInvariant;

impl Invariant<GameSession> for SelectionConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let Some(selection) = session.selection() else {
            return true;
        };
        let board = session.board();
        let origin = selection.origin();

        if session.result().to_move() != Some(selection.player())
            || board.at(origin) != Cell::Owned(selection.player())
        {
            return false;
        }

        let tags_valid = selection.targets().iter().all(|&(coord, reach)| {
            board.at(coord).is_empty() && Reach::from_distance(origin.chebyshev(coord)) == Some(reach)
        });
        let complete = origin
            .within(2)
            .filter(|&coord| board.at(coord).is_empty())
            .all(|coord| selection.reach(coord).is_some());

        tags_valid && complete
    }

    fn description() -> &'static str {
        "Selection overlay matches the board and the player to move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_no_selection_holds() {
        assert!(SelectionConsistentInvariant::holds(&GameSession::new()));
    }

    #[test]
    fn test_fresh_selection_holds() {
        let mut session = GameSession::new();
        session.select(6, 6).unwrap();
        assert!(SelectionConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_stale_origin_violates() {
        let mut session = GameSession::new();
        session.select(0, 0).unwrap();
        session.board_mut().set(0, 0, Cell::Owned(Player::White)).unwrap();
        assert!(!SelectionConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_missing_target_violates() {
        let mut session = GameSession::new();
        session.board_mut().set(0, 1, Cell::Owned(Player::Black)).unwrap();
        session.select(0, 0).unwrap();
        // Opening a cell after the overlay was computed leaves it untagged.
        session.board_mut().set(0, 1, Cell::Empty).unwrap();
        assert!(!SelectionConsistentInvariant::holds(&session));
    }
}
