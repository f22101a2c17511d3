//! Result consistency: the recorded result agrees with the board.

use super::super::rules::adjudicate;
use super::super::{GameResult, GameSession};
use super::Invariant;

/// Invariant: a running game has both sides mobile, a finished game has the
/// result adjudication produces for its board.
///
/// Holds after every executed move. A blank board (after `clean`) does not
/// satisfy it, since nobody can move there yet the session is not finished.
pub struct ResultConsistentInvariant;

impl Invariant<GameSession> for ResultConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        match (session.result(), adjudicate(session.board())) {
            (GameResult::InProgress(_), None) => true,
            (recorded, Some(adjudicated)) => recorded == adjudicated,
            (_, None) => false,
        }
    }

    fn description() -> &'static str {
        "Recorded result agrees with board adjudication"
    }
}
