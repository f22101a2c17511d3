//! End-of-game detection.

use super::super::{Board, GameResult, Player};
use super::reach::can_move;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Piece counts and mobility of both sides, gathered in one board scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Black pieces on the board.
    pub black: usize,
    /// White pieces on the board.
    pub white: usize,
    /// Whether any black piece has an empty cell in reach.
    pub black_can_move: bool,
    /// Whether any white piece has an empty cell in reach.
    pub white_can_move: bool,
}

impl Tally {
    /// Piece count for `player`.
    pub fn count(&self, player: Player) -> usize {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Whether `player` has at least one legal move.
    pub fn can_move(&self, player: Player) -> bool {
        match player {
            Player::Black => self.black_can_move,
            Player::White => self.white_can_move,
        }
    }
}

/// Scans the board once, counting pieces and mobility per side.
#[instrument(skip(board))]
pub fn tally(board: &Board) -> Tally {
    let mut tally = Tally::default();
    for (coord, cell) in board.cells() {
        match cell.owner() {
            Some(Player::Black) => {
                tally.black += 1;
                tally.black_can_move = tally.black_can_move || can_move(board, coord);
            }
            Some(Player::White) => {
                tally.white += 1;
                tally.white_can_move = tally.white_can_move || can_move(board, coord);
            }
            None => {}
        }
    }
    tally
}

/// Decides whether the game is over.
///
/// The game ends as soon as either side has no piece with a legal move,
/// even if the other side could still play. The side with strictly more
/// pieces wins; equal counts are a draw. Returns `None` while both sides
/// can move.
#[instrument(skip(board))]
pub fn adjudicate(board: &Board) -> Option<GameResult> {
    let tally = tally(board);
    debug!(?tally, "Board tallied");

    if Player::iter().all(|player| tally.can_move(player)) {
        return None;
    }

    let result = match tally.black.cmp(&tally.white) {
        std::cmp::Ordering::Greater => GameResult::Win(Player::Black),
        std::cmp::Ordering::Less => GameResult::Win(Player::White),
        std::cmp::Ordering::Equal => GameResult::Draw,
    };
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Coord};

    fn fill(board: &mut Board, player: Player) {
        for coord in Coord::all() {
            board.put(coord, Cell::Owned(player));
        }
    }

    #[test]
    fn test_starting_board_is_not_terminal() {
        assert_eq!(adjudicate(&Board::starting()), None);
    }

    #[test]
    fn test_full_board_counts_pieces() {
        let mut board = Board::new();
        fill(&mut board, Player::White);
        for col in 0..7 {
            board.set(0, col, Cell::Owned(Player::Black)).unwrap();
        }
        assert_eq!(adjudicate(&board), Some(GameResult::Win(Player::White)));
    }

    #[test]
    fn test_one_side_stuck_ends_game() {
        // White has a single boxed-in piece; Black still has room above.
        let mut board = Board::new();
        for row in 2..7 {
            for col in 2..7 {
                board.set(row, col, Cell::Owned(Player::Black)).unwrap();
            }
        }
        board.set(6, 6, Cell::Owned(Player::White)).unwrap();

        let tally = tally(&board);
        assert!(tally.black_can_move);
        assert!(!tally.white_can_move);
        assert_eq!(adjudicate(&board), Some(GameResult::Win(Player::Black)));
    }

    #[test]
    fn test_equal_counts_draw() {
        // Only (0,0) is empty and every cell around it is black, so White is stuck.
        let mut board = Board::new();
        for (index, coord) in Coord::all().enumerate().skip(1) {
            let player = if index <= 24 { Player::Black } else { Player::White };
            board.put(coord, Cell::Owned(player));
        }
        assert_eq!(board.count(Player::Black), 24);
        assert_eq!(board.count(Player::White), 24);
        assert_eq!(adjudicate(&board), Some(GameResult::Draw));
    }

    #[test]
    fn test_side_without_pieces_is_stuck() {
        let mut board = Board::new();
        board.set(3, 3, Cell::Owned(Player::Black)).unwrap();
        board.set(3, 4, Cell::Owned(Player::Black)).unwrap();
        assert_eq!(adjudicate(&board), Some(GameResult::Win(Player::Black)));
    }
}
