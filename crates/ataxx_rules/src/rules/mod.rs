//! Game rules for Ataxx.
//!
//! Pure functions over a [`Board`](crate::Board): movement range, move
//! application with captures, and end-of-game adjudication. The session
//! layer owns turn order and counters and calls into these.

pub mod capture;
pub mod reach;
pub mod terminal;

pub use capture::{apply_move, capture_around};
pub use reach::{can_move, chebyshev_distance, reachable};
pub use terminal::{adjudicate, tally, Tally};
