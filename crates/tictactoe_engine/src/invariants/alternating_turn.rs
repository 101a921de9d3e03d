//! Alternating turn invariant: X and O take turns, X first.

use super::Invariant;
use crate::{GameEngine, Player};

/// Invariant: Moves alternate X, O, X, ... and the player to move matches
/// the parity of the history while the game is running.
pub struct AlternatingTurnInvariant;

impl Invariant<GameEngine> for AlternatingTurnInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let alternates = engine
            .history()
            .iter()
            .enumerate()
            .all(|(i, mov)| mov.player == expected_player(i));

        let to_move_matches =
            engine.status().is_over() || engine.current_player() == expected_player(engine.history().len());

        alternates && to_move_matches
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}

fn expected_player(ply: usize) -> Player {
    if ply % 2 == 0 { Player::X } else { Player::O }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameMode, Position};

    #[test]
    fn test_empty_game_holds() {
        let engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        assert!(AlternatingTurnInvariant::holds(&engine));
    }

    #[test]
    fn test_alternating_moves_hold() {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        engine.place_mark(Position::TopLeft).expect("legal move");
        engine.place_mark(Position::Center).expect("legal move");
        assert!(AlternatingTurnInvariant::holds(&engine));
    }

    #[test]
    fn test_skipped_turn_violates() {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        engine.place_mark(Position::TopLeft).expect("legal move");

        engine.current_player = Player::X;
        assert!(!AlternatingTurnInvariant::holds(&engine));
    }
}
