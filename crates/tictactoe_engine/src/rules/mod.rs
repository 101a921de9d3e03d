//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are separated from
//! the engine so they can be checked against hand-built boards and reused by
//! the invariant checks.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_PATTERNS, WinningLine, check_winner, find_win};

use super::types::{Board, GameStatus};
use tracing::instrument;

/// Classifies a board without touching scores.
///
/// A completed line beats a full board, so a ninth mark that wins is a win,
/// not a draw.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some((player, _)) = find_win(board) {
        GameStatus::Won(player)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Square};

    const X: Square = Square::Occupied(Player::X);
    const O: Square = Square::Occupied(Player::O);
    const E: Square = Square::Empty;

    #[test]
    fn test_evaluate_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_evaluate_top_row_win() {
        let board = Board::from_squares([X, X, X, E, E, E, E, E, E]);
        assert_eq!(evaluate(&board), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_evaluate_full_board_draw() {
        let board = Board::from_squares([X, O, X, X, O, O, O, X, X]);
        assert_eq!(evaluate(&board), GameStatus::Draw);
    }

    #[test]
    fn test_evaluate_winning_last_mark_is_not_draw() {
        let board = Board::from_squares([X, O, X, O, X, O, O, X, X]);
        assert_eq!(evaluate(&board), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_evaluate_partial_board_in_progress() {
        let board = Board::from_squares([X, O, E, E, X, E, E, E, O]);
        assert_eq!(evaluate(&board), GameStatus::InProgress);
    }
}
