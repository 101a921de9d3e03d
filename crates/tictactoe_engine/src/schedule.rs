//! Tickets for delayed computer moves.
//!
//! The front end waits a moment before letting the computer play. Any reset
//! in between bumps the engine's [`Generation`], and a ticket issued before
//! the reset no longer matches, so the stale move is dropped.

use serde::{Deserialize, Serialize};

/// Counts resets over the engine's lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[display("gen {}", _0)]
pub struct Generation(u64);

impl Generation {
    /// The raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Permission for one computer move, valid only within the generation it
/// was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "a computer turn does nothing until redeemed with run_computer_turn"]
pub struct ComputerTurn {
    generation: Generation,
}

impl ComputerTurn {
    pub(crate) fn new(generation: Generation) -> Self {
        Self { generation }
    }

    /// The generation this ticket belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }
}
