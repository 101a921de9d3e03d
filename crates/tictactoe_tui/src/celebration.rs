//! Emoji shower for the end of a game.

use tictactoe_engine::{GameRng, GameStatus};

/// Glyphs thrown for a win.
pub const WIN_EMOJIS: [&str; 5] = ["🎉", "😂", "💥", "👑", "🍕"];

/// Glyphs thrown for a draw.
pub const DRAW_EMOJIS: [&str; 3] = ["🤝", "😎", "✨"];

/// How many glyphs one shower holds.
pub const SHOWER_SIZE: usize = 30;

/// A row of randomly drawn emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    glyphs: Vec<&'static str>,
}

impl Celebration {
    /// Draws a shower for a finished game; nothing for a running one.
    pub fn for_status(status: GameStatus, rng: &mut GameRng) -> Option<Self> {
        let set: &[&'static str] = match status {
            GameStatus::InProgress => return None,
            GameStatus::Won(_) => &WIN_EMOJIS,
            GameStatus::Draw => &DRAW_EMOJIS,
        };
        let glyphs = (0..SHOWER_SIZE)
            .filter_map(|_| rng.choose(set).copied())
            .collect();
        Some(Self { glyphs })
    }

    /// The glyphs in drawing order.
    pub fn glyphs(&self) -> &[&'static str] {
        &self.glyphs
    }

    /// Glyphs that fit in `columns` terminal cells (emoji are two wide).
    pub fn line(&self, columns: u16) -> String {
        self.glyphs
            .iter()
            .take(usize::from(columns) / 2)
            .copied()
            .collect()
    }
}
