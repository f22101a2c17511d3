//! Move application and capture propagation.

use super::super::{Board, Cell, Coord, Move, MoveKind, Player};
use tracing::{debug, instrument};

/// Flips every opponent piece adjacent to `destination` to `mover`.
///
/// Captures are single depth: flipped pieces do not capture further.
/// Returns the number of flipped pieces.
#[instrument(skip(board))]
pub fn capture_around(board: &mut Board, destination: Coord, mover: Player) -> usize {
    let enemy = Cell::Owned(mover.opponent());
    let mut flipped = 0;
    for neighbour in destination.within(1) {
        if board.at(neighbour) == enemy {
            board.put(neighbour, Cell::Owned(mover));
            flipped += 1;
        }
    }
    flipped
}

/// Applies `mv` for `mover` without checking legality.
///
/// Places the piece on the destination, vacates the origin for a jump and
/// captures around the destination. Returns the number of captured pieces.
#[instrument(skip(board))]
pub fn apply_move(board: &mut Board, mover: Player, mv: Move, kind: MoveKind) -> usize {
    board.put(mv.destination, Cell::Owned(mover));
    if kind == MoveKind::Jump {
        board.put(mv.origin, Cell::Empty);
    }
    let captured = capture_around(board, mv.destination, mover);
    debug!(%mv, %kind, captured, "Move applied");
    captured
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_clone_keeps_origin() {
        let mut board = Board::starting();
        apply_move(&mut board, Player::Black, Move::new(at(0, 0), at(1, 1)), MoveKind::Clone);
        assert_eq!(board.at(at(0, 0)), Cell::Owned(Player::Black));
        assert_eq!(board.at(at(1, 1)), Cell::Owned(Player::Black));
        assert_eq!(board.occupied(), 5);
    }

    #[test]
    fn test_jump_vacates_origin() {
        let mut board = Board::starting();
        apply_move(&mut board, Player::Black, Move::new(at(0, 0), at(2, 2)), MoveKind::Jump);
        assert_eq!(board.at(at(0, 0)), Cell::Empty);
        assert_eq!(board.at(at(2, 2)), Cell::Owned(Player::Black));
        assert_eq!(board.occupied(), 4);
    }

    #[test]
    fn test_captures_only_adjacent_opponents() {
        let mut board = Board::new();
        board.put(at(3, 3), Cell::Owned(Player::White));
        board.put(at(4, 4), Cell::Owned(Player::White));
        board.put(at(5, 5), Cell::Owned(Player::White));
        board.put(at(2, 2), Cell::Owned(Player::Black));

        let captured = apply_move(
            &mut board,
            Player::Black,
            Move::new(at(2, 2), at(3, 4)),
            MoveKind::Clone,
        );

        assert_eq!(captured, 2);
        assert_eq!(board.at(at(3, 3)), Cell::Owned(Player::Black));
        assert_eq!(board.at(at(4, 4)), Cell::Owned(Player::Black));
        // Not adjacent to the landing cell: no chained flip.
        assert_eq!(board.at(at(5, 5)), Cell::Owned(Player::White));
    }
}
