//! Tic-tac-toe game engine.
//!
//! A single [`GameEngine`] owns the board, whose turn it is, the game
//! status and the session scores. Front ends drive it through commands
//! ([`GameEngine::place_mark`], [`GameEngine::computer_move`], resets and
//! mode changes) and learn about changes through [`GameEvent`]s.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameEngine, GameMode, GameStatus, Player};
//!
//! let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 7);
//! for index in [0, 3, 1, 4, 2] {
//!     engine.place_index(index).expect("legal move");
//! }
//! assert_eq!(*engine.status(), GameStatus::Won(Player::X));
//! assert_eq!(*engine.scores().x(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod events;
pub mod invariants;
mod position;
mod rng;
pub mod rules;
mod schedule;
mod types;

pub use action::{Move, MoveError, MoveOutcome};
pub use engine::GameEngine;
pub use events::{GameEvent, GameObserver};
pub use position::{OutOfBounds, Position};
pub use rng::GameRng;
pub use rules::{WIN_PATTERNS, WinningLine};
pub use schedule::{ComputerTurn, Generation};
pub use types::{Board, GameMode, GameStatus, Player, Scores, Square};

/// Alias for clarity where a player is talked about as a symbol on the board.
pub type Mark = Player;
