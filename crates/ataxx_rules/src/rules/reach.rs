//! Movement range: which empty cells a piece can clone or jump to.

use super::super::{Board, Coord, Reach};
use tracing::instrument;

/// Largest Chebyshev distance a piece can travel.
pub const MAX_REACH: usize = 2;

/// Chebyshev distance between two cells: `max(|r1-r2|, |c1-c2|)`.
pub fn chebyshev_distance(a: Coord, b: Coord) -> usize {
    a.chebyshev(b)
}

/// Empty cells within reach of `origin`, tagged by distance.
///
/// Cells are returned in row-major order. The ownership of `origin` is not
/// checked here.
#[instrument(skip(board))]
pub fn reachable(board: &Board, origin: Coord) -> Vec<(Coord, Reach)> {
    origin
        .within(MAX_REACH)
        .filter(|&coord| board.at(coord).is_empty())
        .filter_map(|coord| Reach::from_distance(origin.chebyshev(coord)).map(|reach| (coord, reach)))
        .collect()
}

/// Checks whether the piece at `coord` has at least one empty cell in reach.
pub fn can_move(board: &Board, coord: Coord) -> bool {
    coord
        .within(MAX_REACH)
        .any(|target| board.at(target).is_empty())
}
