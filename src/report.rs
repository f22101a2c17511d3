//! Text and JSON renderings of sessions and save files.

use ataxx_rules::{Board, CellView, GameResult, GameSession, Snapshot, result_code};
use derive_getters::Getters;
use serde::Serialize;
use tracing::instrument;

/// Renders the board with row and column labels.
///
/// With `show_tags` the selection overlay is drawn: lower case for the
/// selected piece, `1` for clone targets, `2` for jump targets.
#[instrument(skip(session))]
pub fn render_board(session: &GameSession, show_tags: bool) -> String {
    let mut out = String::from("  0123456\n");
    let mut row_text = String::new();
    for (coord, view) in session.cell_views() {
        let view = match view {
            CellView::Reach(_) if !show_tags => CellView::Empty,
            CellView::Origin(player) if !show_tags => CellView::Piece(player),
            other => other,
        };
        row_text.push(view.glyph());
        if coord.col() == ataxx_rules::BOARD_SIZE - 1 {
            out.push_str(&format!("{} {}\n", coord.row(), row_text));
            row_text.clear();
        }
    }
    out
}

/// One-line status: result, piece counts, move counter and clock.
pub fn status_line(session: &GameSession) -> String {
    let (black, white) = session.counts();
    format!(
        "{} | B {} W {} | move {} | {}s{}",
        session.result(),
        black,
        white,
        session.move_count(),
        session.elapsed_seconds(),
        if session.timer_enabled() { "" } else { " (stopped)" }
    )
}

/// Serializable summary of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SessionReport {
    /// Game result.
    result: GameResult,
    /// Save-format code of the result.
    game_state: u8,
    /// Black piece count.
    black: usize,
    /// White piece count.
    white: usize,
    /// Moves executed.
    move_count: u32,
    /// Seconds counted.
    elapsed_seconds: u32,
    /// Whether the clock runs.
    timer_enabled: bool,
    /// Board rows as `.`/`B`/`W` strings.
    board: Vec<String>,
}

impl SessionReport {
    /// Summarizes a session.
    #[instrument(skip(session))]
    pub fn from_session(session: &GameSession) -> Self {
        let (black, white) = session.counts();
        Self {
            result: session.result(),
            game_state: result_code(session.result()),
            black,
            white,
            move_count: session.move_count(),
            elapsed_seconds: session.elapsed_seconds(),
            timer_enabled: session.timer_enabled(),
            board: board_rows(session.board()),
        }
    }
}

/// Serializable view of a save file: the raw snapshot plus its decoded board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SnapshotReport {
    /// The snapshot as stored.
    snapshot: Snapshot,
    /// Decoded session summary.
    session: SessionReport,
}

impl SnapshotReport {
    /// Decodes the snapshot into a report.
    #[instrument]
    pub fn new(snapshot: Snapshot) -> Result<Self, ataxx_rules::PersistenceError> {
        let session = snapshot.into_session()?;
        Ok(Self {
            snapshot,
            session: SessionReport::from_session(&session),
        })
    }
}

fn board_rows(board: &Board) -> Vec<String> {
    board.to_string().lines().map(str::to_string).collect()
}
