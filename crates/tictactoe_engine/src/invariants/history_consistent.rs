//! History consistency invariant: the record of moves explains the board.

use super::Invariant;
use crate::{GameEngine, rules};

/// Invariant: One history entry per filled square, the stored status is
/// what the rules say about the board, and a winning line is recorded
/// exactly when the game is won.
pub struct HistoryConsistentInvariant;

impl Invariant<GameEngine> for HistoryConsistentInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let counts_match = engine.history().len() == engine.board().filled();
        let status_matches = *engine.status() == rules::evaluate(engine.board());
        let line_matches = engine.winning_line().is_some() == engine.status().winner().is_some();

        counts_match && status_matches && line_matches
    }

    fn description() -> &'static str {
        "History, status and winning line agree with the board"
    }
}
