//! Notifications the engine sends to whoever draws the game.

use super::rules::WinningLine;
use super::{GameStatus, Player, Position};

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark landed on the board.
    MoveApplied {
        /// Where it landed.
        position: Position,
        /// Whose mark it was.
        mark: Player,
    },
    /// The game reached a terminal state.
    GameEnded {
        /// `Won` or `Draw`.
        status: GameStatus,
        /// The cells to highlight, present only for a win.
        winning_line: Option<WinningLine>,
    },
    /// The board was cleared.
    Reset {
        /// True when the scores were zeroed as well.
        scores_cleared: bool,
    },
}

/// Receives [`GameEvent`]s synchronously, in the order they happen.
pub trait GameObserver {
    /// Called once per event.
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}
