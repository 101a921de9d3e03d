//! Player display names and the form that collects them.
//!
//! Names are cosmetic; the engine never sees them.

use tictactoe_engine::Player;
use unicode_width::UnicodeWidthChar;

/// Widest name shown on the scoreboard, in terminal columns.
pub const MAX_NAME_WIDTH: usize = 16;

/// Names shown for X and O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerNames {
    x: String,
    o: String,
}

impl PlayerNames {
    /// Builds names from raw input. Blank input falls back to "Player X" or
    /// "Player O"; anything wider than [`MAX_NAME_WIDTH`] is cut.
    pub fn new(x: &str, o: &str) -> Self {
        Self {
            x: clean(x, Player::X),
            o: clean(o, Player::O),
        }
    }

    /// Name for `player`.
    pub fn get(&self, player: Player) -> &str {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    /// "X-name vs O-name".
    pub fn headline(&self) -> String {
        format!("{} vs {}", self.x, self.o)
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self::new("", "")
    }
}

fn clean(raw: &str, player: Player) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return format!("Player {}", player);
    }
    truncate_to_width(trimmed, MAX_NAME_WIDTH)
}

/// Cuts `s` to at most `max` terminal columns without splitting a glyph.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    let mut width = 0;
    s.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max
        })
        .collect()
}

/// Which text field of the name form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameField {
    /// The X field.
    #[default]
    X,
    /// The O field.
    O,
}

/// The start-of-session name form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameForm {
    x: String,
    o: String,
    focus: NameField,
}

impl NameForm {
    /// Form pre-filled with earlier input.
    pub fn prefilled(x: &str, o: &str) -> Self {
        Self {
            x: x.to_string(),
            o: o.to_string(),
            focus: NameField::X,
        }
    }

    /// Field with focus.
    pub fn focus(&self) -> NameField {
        self.focus
    }

    /// Current raw text of a field.
    pub fn value(&self, field: NameField) -> &str {
        match field {
            NameField::X => &self.x,
            NameField::O => &self.o,
        }
    }

    /// Moves focus to the other field.
    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            NameField::X => NameField::O,
            NameField::O => NameField::X,
        };
    }

    /// Appends a character to the focused field, ignoring control chars and
    /// input past the display width.
    pub fn push(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let field = self.field_mut();
        let width: usize = field.chars().filter_map(|ch| ch.width()).sum();
        if width + c.width().unwrap_or(0) <= MAX_NAME_WIDTH {
            field.push(c);
        }
    }

    /// Deletes the last character of the focused field.
    pub fn backspace(&mut self) {
        self.field_mut().pop();
    }

    /// Finished names, with defaults applied.
    pub fn submit(&self) -> PlayerNames {
        PlayerNames::new(&self.x, &self.o)
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            NameField::X => &mut self.x,
            NameField::O => &mut self.o,
        }
    }
}
