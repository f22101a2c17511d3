//! Contract-based validation for Ataxx moves.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}. Preconditions
//! are always checked; postconditions run in debug builds.

use super::invariants::{InvariantSet, SessionInvariants};
use super::{Cell, GameError, GameSession, Move, MoveKind};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// What the precondition learns about the action when it holds.
    type Evidence;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Evidence, GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S, action: &A) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not finished.
pub struct GameRunning;

impl GameRunning {
    /// Fails with [`GameError::GameOver`] for a won or drawn game.
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), GameError> {
        if session.result().is_terminal() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: a selection is active and starts at the move's origin.
pub struct SelectedOrigin;

impl SelectedOrigin {
    /// Checks the selection origin against `mv.origin`.
    #[instrument(skip(session))]
    pub fn check(mv: &Move, session: &GameSession) -> Result<(), GameError> {
        let selection = session
            .selection()
            .ok_or_else(|| GameError::IllegalMove("no active selection".to_string()))?;
        if selection.origin() != mv.origin {
            return Err(GameError::IllegalMove(format!(
                "{} is not the selected piece (selected {})",
                mv.origin,
                selection.origin()
            )));
        }
        Ok(())
    }
}

/// Precondition: the destination is tagged in the active selection.
pub struct TaggedDestination;

impl TaggedDestination {
    /// Returns the move kind the destination's tag implies.
    #[instrument(skip(session))]
    pub fn check(mv: &Move, session: &GameSession) -> Result<MoveKind, GameError> {
        session
            .selection()
            .and_then(|selection| selection.reach(mv.destination))
            .map(|reach| reach.kind())
            .ok_or_else(|| {
                GameError::IllegalMove(format!("{} is not reachable from {}", mv.destination, mv.origin))
            })
    }
}

/// Precondition: the move counter can still advance.
pub struct CounterHeadroom;

impl CounterHeadroom {
    /// Fails with [`GameError::IllegalMove`] once `move_count` is at `u32::MAX`.
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), GameError> {
        match session.move_count().checked_add(1) {
            Some(_) => Ok(()),
            None => Err(GameError::IllegalMove(format!(
                "move counter exhausted at {}",
                session.move_count()
            ))),
        }
    }
}

/// Composite precondition for executing a move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(session))]
    pub fn check(mv: &Move, session: &GameSession) -> Result<MoveKind, GameError> {
        GameRunning::check(session)?;
        CounterHeadroom::check(session)?;
        SelectedOrigin::check(mv, session)?;
        TaggedDestination::check(mv, session)
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for executing a move.
///
/// Preconditions:
/// - Game is running
/// - Move counter has room to advance
/// - Selection is active at the move's origin
/// - Destination is tagged as reachable
///
/// Postconditions:
/// - Move counter advanced by exactly one
/// - Clones add one piece, jumps keep the total
/// - Destination belongs to the mover and has no opponent neighbour
/// - Session invariants hold
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    type Evidence = MoveKind;

    fn pre(session: &GameSession, action: &Move) -> Result<MoveKind, GameError> {
        LegalMove::check(action, session)
    }

    fn post(before: &GameSession, after: &GameSession, action: &Move) -> Result<(), GameError> {
        let fail = |message: String| {
            warn!(%action, %message, "Move postcondition failed");
            Err(GameError::InvariantViolation(message))
        };

        if before.move_count().checked_add(1) != Some(after.move_count()) {
            return fail(format!(
                "move count went from {} to {}",
                before.move_count(),
                after.move_count()
            ));
        }

        let added = match action.kind() {
            Some(MoveKind::Clone) => 1,
            Some(MoveKind::Jump) => 0,
            None => return fail(format!("{} is out of range", action)),
        };
        if after.board().occupied() != before.board().occupied() + added {
            return fail(format!(
                "piece total went from {} to {}",
                before.board().occupied(),
                after.board().occupied()
            ));
        }

        let Some(mover) = before.result().to_move() else {
            return fail("move applied to a finished game".to_string());
        };
        let enemy = Cell::Owned(mover.opponent());
        if after.board().at(action.destination) != Cell::Owned(mover)
            || action
                .destination
                .within(1)
                .any(|coord| after.board().at(coord) == enemy)
        {
            return fail(format!("{} left with uncaptured neighbours for {}", action.destination, mover));
        }

        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
