//! Property tests over arbitrary click sequences.

use proptest::prelude::*;
use tictactoe_engine::invariants::{EngineInvariants, InvariantSet};
use tictactoe_engine::{GameEngine, GameMode, GameStatus, Player, Square, rules};

proptest! {
    #[test]
    fn cells_are_written_at_most_once(clicks in prop::collection::vec(0usize..12, 0..40)) {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        let mut first_mark: [Option<Square>; 9] = [None; 9];

        for index in clicks {
            let _ = engine.place_index(index);
            for (cell, square) in engine.board().squares().iter().enumerate() {
                if *square == Square::Empty {
                    prop_assert!(first_mark[cell].is_none());
                } else {
                    let seen = *first_mark[cell].get_or_insert(*square);
                    prop_assert_eq!(seen, *square);
                }
            }
        }
    }

    #[test]
    fn turn_follows_parity_while_running(clicks in prop::collection::vec(0usize..9, 0..20)) {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        for index in clicks {
            let _ = engine.place_index(index);
            if *engine.status() == GameStatus::InProgress {
                let expected = if engine.history().len() % 2 == 0 { Player::X } else { Player::O };
                prop_assert_eq!(engine.current_player(), expected);
            }
        }
    }

    #[test]
    fn stored_status_matches_rules(clicks in prop::collection::vec(0usize..9, 0..20)) {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 0);
        for index in clicks {
            let _ = engine.place_index(index);
            prop_assert_eq!(*engine.status(), rules::evaluate(engine.board()));
            prop_assert!(EngineInvariants::check_all(&engine).is_ok());
        }
    }

    #[test]
    fn scores_never_decrease_without_full_reset(
        games in prop::collection::vec(prop::collection::vec(0usize..9, 0..12), 1..6),
        seed in any::<u64>(),
    ) {
        let mut engine = GameEngine::with_seed(GameMode::VsComputer, seed);
        let mut last = *engine.scores();
        for clicks in games {
            for index in clicks {
                let _ = engine.place_index(index);
                engine.computer_move();
                let now = *engine.scores();
                prop_assert!(now.x() >= last.x() && now.o() >= last.o());
                last = now;
            }
            engine.reset_board();
        }
    }
}
