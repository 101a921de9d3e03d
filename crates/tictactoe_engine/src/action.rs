//! Moves and the reasons a move is turned away.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why a placement was ignored.
///
/// These are ordinary input races (a click on a taken cell, a key pressed
/// after the game ended) and leave the engine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The computer is to move; humans have to wait.
    #[display("It's the computer's turn")]
    ComputerTurn,

    /// The index does not name a cell.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),
}

impl From<super::position::OutOfBounds> for MoveError {
    fn from(err: super::position::OutOfBounds) -> Self {
        MoveError::OutOfBounds(err.index)
    }
}

/// What an accepted placement produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move that was applied.
    pub applied: Move,
    /// Status after evaluating the board.
    pub status: super::GameStatus,
}
