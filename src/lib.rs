//! Ataxx console and save-file tooling.
//!
//! The rules live in [`ataxx_rules`]; this crate adds configuration, text
//! and JSON reports, and a line-oriented console that drives a
//! [`GameSession`] the way a graphical front end would.
//!
//! # Architecture
//!
//! - **Config**: TOML settings for the save path and start-up state
//! - **Report**: board rendering, status lines, JSON summaries
//! - **Console**: command parsing and the play loop
//!
//! # Example
//!
//! ```
//! use ataxx::{AtaxxConfig, Console, Flow};
//!
//! let mut console = Console::new(AtaxxConfig::default(), Vec::new());
//! console.execute("0 0")?;
//! console.execute("1 1")?;
//! assert_eq!(console.session().move_count(), 1);
//! assert_eq!(console.execute("quit")?, Flow::Quit);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod report;

// Crate-level exports - Configuration
pub use config::{AtaxxConfig, ConfigError};

// Crate-level exports - Console driver
pub use console::{Command, CommandError, Console, Flow, Verb};

// Crate-level exports - Reports
pub use report::{SessionReport, SnapshotReport, render_board, status_line};

// Crate-level exports - Game types
pub use ataxx_rules::{
    Activation, Board, Cell, CellView, Coord, GameError, GameResult, GameSession, Move, MoveKind,
    PersistenceError, Player, Reach, Selection, Snapshot, BOARD_SIZE,
};
