//! First-class invariants for Ataxx sessions.
//!
//! Invariants are logical properties that must hold after every executed
//! move. They are checked by the move contract in debug builds and can be
//! tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for triples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        collect::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

pub mod result_consistent;
pub mod selection_consistent;
pub mod timer_stopped;

pub use result_consistent::ResultConsistentInvariant;
pub use selection_consistent::SelectionConsistentInvariant;
pub use timer_stopped::TimerStoppedInvariant;

/// All session invariants as a composable set.
pub type SessionInvariants = (
    SelectionConsistentInvariant,
    ResultConsistentInvariant,
    TimerStoppedInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GameSession, Player};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let session = GameSession::new();
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut session = GameSession::new();
        session.handle_cell_activation(0, 0).unwrap();
        session.handle_cell_activation(1, 1).unwrap();
        session.handle_cell_activation(0, 6).unwrap();
        session.handle_cell_activation(2, 4).unwrap();
        assert_eq!(session.move_count(), 2);
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut session = GameSession::new();
        session.select(0, 0).unwrap();
        // Fill a tagged cell behind the selection's back.
        session.board_mut().set(0, 1, Cell::Owned(Player::White)).unwrap();

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            SelectionConsistentInvariant::description()
        );
    }
}
