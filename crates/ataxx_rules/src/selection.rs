//! Selection overlay: the picked origin and the cells it can reach.
//!
//! The overlay is derived from the board whenever a piece is selected and is
//! never stored in the board or in save files.

use super::rules::reachable;
use super::{Board, Cell, Coord, MoveKind, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Tag of a reachable empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Reach {
    /// Chebyshev distance 1 from the origin.
    #[display("clone range")]
    CloneRange,
    /// Chebyshev distance 2 from the origin.
    #[display("jump range")]
    JumpRange,
}

impl Reach {
    /// Tags a Chebyshev distance, `None` outside the movement range.
    pub fn from_distance(distance: usize) -> Option<Self> {
        MoveKind::from_distance(distance).map(Self::from)
    }

    /// The kind of move made by landing on a cell with this tag.
    pub fn kind(self) -> MoveKind {
        match self {
            Reach::CloneRange => MoveKind::Clone,
            Reach::JumpRange => MoveKind::Jump,
        }
    }
}

impl From<MoveKind> for Reach {
    fn from(kind: MoveKind) -> Self {
        match kind {
            MoveKind::Clone => Reach::CloneRange,
            MoveKind::Jump => Reach::JumpRange,
        }
    }
}

/// An active selection: the origin piece and its reachable destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    origin: Coord,
    player: Player,
    targets: Vec<(Coord, Reach)>,
}

impl Selection {
    /// Computes the selection for the piece of `player` at `origin`.
    ///
    /// Ownership is checked by the caller.
    #[instrument(skip(board))]
    pub fn compute(board: &Board, origin: Coord, player: Player) -> Self {
        Self {
            origin,
            player,
            targets: reachable(board, origin),
        }
    }

    /// The selected piece.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Owner of the selected piece.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Reachable cells in row-major order.
    pub fn targets(&self) -> &[(Coord, Reach)] {
        &self.targets
    }

    /// Tag of `coord`, if it is a reachable destination.
    pub fn reach(&self, coord: Coord) -> Option<Reach> {
        self.targets
            .iter()
            .find(|(target, _)| *target == coord)
            .map(|(_, reach)| *reach)
    }

    /// Returns true if the origin piece has no destination at all.
    pub fn is_stuck(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A cell as the UI should draw it: board content with the selection applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellView {
    /// Empty and not reachable.
    Empty,
    /// A piece that is not selected.
    Piece(Player),
    /// The selected piece.
    Origin(Player),
    /// An empty cell reachable from the selected piece.
    Reach(Reach),
}

impl CellView {
    /// Combines a board cell with an optional selection.
    pub fn resolve(coord: Coord, cell: Cell, selection: Option<&Selection>) -> Self {
        match (cell, selection) {
            (Cell::Owned(player), Some(sel)) if sel.origin() == coord => CellView::Origin(player),
            (Cell::Owned(player), _) => CellView::Piece(player),
            (Cell::Empty, Some(sel)) => sel.reach(coord).map_or(CellView::Empty, CellView::Reach),
            (Cell::Empty, None) => CellView::Empty,
        }
    }

    /// Single-character glyph: `.` empty, `B`/`W` pieces, lower case for the
    /// selected piece, `1`/`2` for clone and jump targets.
    pub fn glyph(self) -> char {
        match self {
            CellView::Empty => '.',
            CellView::Piece(player) => player.symbol(),
            CellView::Origin(player) => player.symbol().to_ascii_lowercase(),
            CellView::Reach(Reach::CloneRange) => '1',
            CellView::Reach(Reach::JumpRange) => '2',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_selection_tags_by_distance() {
        let board = Board::starting();
        let selection = Selection::compute(&board, at(0, 0), Player::Black);

        assert_eq!(selection.reach(at(0, 1)), Some(Reach::CloneRange));
        assert_eq!(selection.reach(at(1, 1)), Some(Reach::CloneRange));
        assert_eq!(selection.reach(at(0, 2)), Some(Reach::JumpRange));
        assert_eq!(selection.reach(at(0, 3)), None);
        assert_eq!(selection.reach(at(0, 0)), None);
    }

    #[test]
    fn test_cell_view_overlay() {
        let board = Board::starting();
        let selection = Selection::compute(&board, at(6, 6), Player::Black);

        let view = |row, col| {
            let coord = at(row, col);
            CellView::resolve(coord, board.at(coord), Some(&selection))
        };
        assert_eq!(view(6, 6), CellView::Origin(Player::Black));
        assert_eq!(view(0, 0), CellView::Piece(Player::Black));
        assert_eq!(view(5, 5), CellView::Reach(Reach::CloneRange));
        assert_eq!(view(4, 6), CellView::Reach(Reach::JumpRange));
        assert_eq!(view(3, 3), CellView::Empty);
        assert_eq!(view(6, 6).glyph(), 'b');
    }
}
