//! Game session: turn order, selection, counters and the click dispatcher.

use super::contracts::{Contract, MoveContract};
use super::rules::{adjudicate, apply_move};
use super::{Board, Cell, CellView, Coord, GameError, GameResult, Move, MoveKind, Player, Selection};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// What a cell activation did to the session.
///
/// A [`Activation::Moved`] outcome is the notification that the move
/// counter changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Activation {
    /// The input did not change the session.
    Ignored,
    /// A piece was selected with no previous selection.
    Selected(Coord),
    /// The selection moved to another piece of the same player.
    Reselected(Coord),
    /// A move was executed.
    Moved {
        /// The executed move.
        mv: Move,
        /// Clone or jump.
        kind: MoveKind,
        /// Move counter after the move.
        move_count: u32,
        /// Result after the move.
        result: GameResult,
    },
}

/// A single game of Ataxx, as driven by a UI.
///
/// The session exclusively owns its board and selection overlay. A fresh
/// logical game only starts through [`GameSession::new_game`],
/// [`GameSession::clean`] or a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    result: GameResult,
    selection: Option<Selection>,
    move_count: u32,
    elapsed_seconds: u32,
    timer_enabled: bool,
}

impl GameSession {
    /// Creates a session with a new game started.
    #[instrument]
    pub fn new() -> Self {
        let mut session = Self::blank();
        session.new_game();
        session
    }

    /// Creates a session with a blank board and the timer stopped.
    #[instrument]
    pub fn blank() -> Self {
        Self {
            board: Board::new(),
            result: GameResult::default(),
            selection: None,
            move_count: 0,
            elapsed_seconds: 0,
            timer_enabled: false,
        }
    }

    /// Creates a running session from an arbitrary position.
    ///
    /// Counters start at zero and the timer is enabled. The position is
    /// not adjudicated until the first move.
    #[instrument(skip(board))]
    pub fn from_position(board: Board, to_move: Player) -> Self {
        Self {
            board,
            result: GameResult::InProgress(to_move),
            selection: None,
            move_count: 0,
            elapsed_seconds: 0,
            timer_enabled: true,
        }
    }

    pub(crate) fn from_parts(
        board: Board,
        result: GameResult,
        move_count: u32,
        elapsed_seconds: u32,
        timer_enabled: bool,
    ) -> Self {
        Self {
            board,
            result,
            selection: None,
            move_count,
            elapsed_seconds,
            timer_enabled,
        }
    }

    /// Starts a new game: corner position, Black to move, timer running.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.reset(Board::starting(), true);
        info!("New game started");
    }

    /// Blanks the board without starting a game; the timer stays off.
    #[instrument(skip(self))]
    pub fn clean(&mut self) {
        self.reset(Board::new(), false);
        info!("Board cleaned");
    }

    fn reset(&mut self, board: Board, timer_enabled: bool) {
        *self = Self {
            board,
            result: GameResult::InProgress(Player::Black),
            selection: None,
            move_count: 0,
            elapsed_seconds: 0,
            timer_enabled,
        };
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns the game result.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Returns the active selection, if any.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Number of moves executed in this game.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Seconds counted by [`GameSession::tick`].
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Whether ticks advance the elapsed-time counter.
    pub fn timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    /// Piece counts as `(black, white)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.board.count(Player::Black), self.board.count(Player::White))
    }

    /// The cell at `(row, col)` with the selection overlay applied.
    pub fn cell_view(&self, row: usize, col: usize) -> Result<CellView, GameError> {
        let coord = Coord::new(row, col)?;
        Ok(CellView::resolve(coord, self.board.at(coord), self.selection()))
    }

    /// Every cell with the selection overlay applied, in row-major order.
    pub fn cell_views(&self) -> impl Iterator<Item = (Coord, CellView)> + '_ {
        self.board
            .cells()
            .map(move |(coord, cell)| (coord, CellView::resolve(coord, cell, self.selection())))
    }

    /// Selects the piece at `(row, col)` for the player to move.
    ///
    /// Replaces any active selection. Fails with [`GameError::IllegalMove`]
    /// if the cell is not a piece of the player to move; the previous
    /// selection is then kept.
    #[instrument(skip(self))]
    pub fn select(&mut self, row: usize, col: usize) -> Result<&Selection, GameError> {
        let origin = Coord::new(row, col)?;
        let Some(player) = self.result.to_move() else {
            return Err(GameError::GameOver);
        };
        if !self.board.at(origin).is_owned_by(player) {
            return Err(GameError::IllegalMove(format!(
                "{} does not hold a {} piece",
                origin, player
            )));
        }

        let selection = Selection::compute(&self.board, origin, player);
        debug!(%origin, targets = selection.targets().len(), "Piece selected");
        let selection = self.selection.insert(selection);
        Ok(&*selection)
    }

    /// Discards the active selection without touching the board.
    #[instrument(skip(self))]
    pub fn clear_selection(&mut self) -> Result<(), GameError> {
        match self.selection.take() {
            Some(selection) => {
                debug!(origin = %selection.origin(), "Selection cleared");
                Ok(())
            }
            None => Err(GameError::NoActiveSelection),
        }
    }

    /// Executes the move from the selected `origin` to a tagged `destination`.
    ///
    /// Places the piece, vacates the origin for a jump, captures around the
    /// destination, advances the counter, passes the turn and adjudicates.
    /// The selection is cleared. On error the session is unchanged.
    #[instrument(skip(self))]
    pub fn execute_move(&mut self, origin: Coord, destination: Coord) -> Result<GameResult, GameError> {
        let mv = Move::new(origin, destination);
        let kind = MoveContract::pre(self, &mv)?;
        let Some(mover) = self.result.to_move() else {
            return Err(GameError::GameOver);
        };

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.selection = None;
        let captured = apply_move(&mut self.board, mover, mv, kind);
        self.move_count = self.move_count.saturating_add(1);
        self.result = GameResult::InProgress(mover.opponent());

        if let Some(outcome) = adjudicate(&self.board) {
            let (black, white) = self.counts();
            info!(%outcome, black, white, "Game over");
            self.result = outcome;
            self.timer_enabled = false;
        }

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self, &mv) {
            *self = before;
            return Err(e);
        }

        info!(
            %mv,
            %kind,
            captured,
            move_count = self.move_count,
            result = %self.result,
            "Move executed"
        );
        Ok(self.result)
    }

    /// Executes a move from the current selection to `(row, col)`.
    #[instrument(skip(self))]
    pub fn confirm_move(&mut self, row: usize, col: usize) -> Result<GameResult, GameError> {
        let destination = Coord::new(row, col)?;
        let origin = self
            .selection
            .as_ref()
            .map(Selection::origin)
            .ok_or_else(|| GameError::IllegalMove("no active selection".to_string()))?;
        self.execute_move(origin, destination)
    }

    /// Handles a click on `(row, col)`.
    ///
    /// Only out-of-bounds coordinates are errors. Clicks that break the
    /// rules are ignored and leave the session untouched.
    #[instrument(skip(self))]
    pub fn handle_cell_activation(&mut self, row: usize, col: usize) -> Result<Activation, GameError> {
        let coord = Coord::new(row, col)?;
        let Some(player) = self.result.to_move() else {
            debug!(result = %self.result, "Click ignored: game over");
            return Ok(Activation::Ignored);
        };

        if self.board.at(coord).is_owned_by(player) {
            let had_selection = self.selection.is_some();
            self.select(row, col)?;
            return Ok(if had_selection {
                Activation::Reselected(coord)
            } else {
                Activation::Selected(coord)
            });
        }

        let Some(selection) = self.selection.as_ref() else {
            debug!(%coord, "Click ignored: nothing selected");
            return Ok(Activation::Ignored);
        };
        let origin = selection.origin();
        let Some(reach) = selection.reach(coord) else {
            debug!(%coord, "Click ignored: not a tagged cell");
            return Ok(Activation::Ignored);
        };

        let mv = Move::new(origin, coord);
        match self.execute_move(origin, coord) {
            Ok(result) => Ok(Activation::Moved {
                mv,
                kind: reach.kind(),
                move_count: self.move_count,
                result,
            }),
            Err(e) => {
                warn!(%mv, error = %e, "Tagged click rejected");
                Ok(Activation::Ignored)
            }
        }
    }

    /// Advances the elapsed-time counter by one second.
    ///
    /// Returns false and does nothing while the timer is disabled or the
    /// game is finished.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> bool {
        if !self.timer_enabled || self.result.is_terminal() {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        true
    }

    /// Whether `(row, col)` holds a piece that still has a destination.
    pub fn can_move(&self, row: usize, col: usize) -> Result<bool, GameError> {
        let coord = Coord::new(row, col)?;
        Ok(self.board.at(coord) != Cell::Empty && super::rules::can_move(&self.board, coord))
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
