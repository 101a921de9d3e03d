//! Monotonic board invariant: squares never change once set.

use super::Invariant;
use crate::{Board, GameEngine, Square};

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Replaying the move history onto an empty board must only ever fill empty
/// squares and must reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<GameEngine> for MonotonicBoardInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let mut reconstructed = Board::new();

        for mov in engine.history() {
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.player));
        }

        reconstructed == *engine.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameMode, Move, Player, Position};

    #[test]
    fn test_empty_game_holds() {
        let engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        assert!(MonotonicBoardInvariant::holds(&engine));
    }

    #[test]
    fn test_multiple_moves_hold() {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        for pos in [Position::TopLeft, Position::Center, Position::TopRight, Position::BottomLeft] {
            engine.place_mark(pos).expect("legal move");
        }
        assert!(MonotonicBoardInvariant::holds(&engine));
    }

    #[test]
    fn test_overwritten_square_violates() {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        engine.place_mark(Position::Center).expect("legal move");

        engine.board.set(Position::Center, Square::Occupied(Player::O));
        assert!(!MonotonicBoardInvariant::holds(&engine));
    }

    #[test]
    fn test_duplicate_history_violates() {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        engine.place_mark(Position::Center).expect("legal move");

        engine.history.push(Move::new(Player::O, Position::Center));
        assert!(!MonotonicBoardInvariant::holds(&engine));
    }
}
