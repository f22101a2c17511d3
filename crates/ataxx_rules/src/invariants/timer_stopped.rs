//! Timer invariant: the clock stops when the game ends.

use super::super::GameSession;
use super::Invariant;

/// Invariant: a finished game does not run its elapsed-time counter.
///
/// Loading a finished game re-enables the timer flag; `tick` still refuses
/// to count for it, so this invariant is only checked after moves.
pub struct TimerStoppedInvariant;

impl Invariant<GameSession> for TimerStoppedInvariant {
    fn holds(session: &GameSession) -> bool {
        !session.result().is_terminal() || !session.timer_enabled()
    }

    fn description() -> &'static str {
        "Timer is disabled once the game is finished"
    }
}
