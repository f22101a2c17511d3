//! Pure Ataxx game logic.
//!
//! Two players, Black and White, take turns on a 7x7 board. A piece may
//! clone into an adjacent empty cell or jump two cells away, vacating its
//! origin. Opponent pieces next to the landing cell change sides. The game
//! ends as soon as one side has no move left; more pieces wins.
//!
//! # Layers
//!
//! - [`Board`] holds cell ownership only.
//! - [`rules`] derives reach, applies moves and adjudicates.
//! - [`Selection`] is the transient highlight overlay for a picked piece.
//! - [`GameSession`] runs the click-driven state machine.
//! - [`Snapshot`] reads and writes the save format.
//!
//! # Example
//!
//! ```
//! use ataxx_rules::{Activation, Cell, GameSession, Player};
//!
//! let mut session = GameSession::new();
//! session.handle_cell_activation(0, 0)?;
//! let outcome = session.handle_cell_activation(0, 2)?;
//! assert!(matches!(outcome, Activation::Moved { move_count: 1, .. }));
//! assert_eq!(session.board().get(0, 0)?, Cell::Empty);
//! assert_eq!(session.board().get(0, 2)?, Cell::Owned(Player::Black));
//! # Ok::<(), ataxx_rules::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod codec;
pub mod contracts;
pub mod invariants;
mod phases;
pub mod rules;
mod selection;
mod session;
mod types;

pub use action::{GameError, Move, MoveKind};
pub use codec::{result_code, result_from_code, PersistenceError, Snapshot, GRID_MASK, KEYS};
pub use phases::GameResult;
pub use selection::{CellView, Reach, Selection};
pub use session::{Activation, GameSession};
pub use types::{Board, Cell, Coord, Player, BOARD_SIZE};
