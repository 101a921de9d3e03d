//! Dark and light palettes.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Which palette the board is drawn with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Light marks on the terminal's dark background.
    #[default]
    #[display("dark")]
    Dark,
    /// Dark marks on a white background.
    #[display("light")]
    Light,
}

/// Colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: Color,
    /// Ordinary text.
    pub text: Color,
    /// Separators and hints.
    pub muted: Color,
    /// Title and accents.
    pub accent: Color,
    /// Color of X marks.
    pub x: Color,
    /// Color of O marks.
    pub o: Color,
    /// Background of the cell under the cursor.
    pub cursor: Color,
    /// Background of cells on the winning line.
    pub winner: Color,
}

impl Theme {
    /// Switches to the other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Colors for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::Reset,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                x: Color::LightBlue,
                o: Color::LightRed,
                cursor: Color::Gray,
                winner: Color::Green,
            },
            Theme::Light => Palette {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Magenta,
                x: Color::Blue,
                o: Color::Red,
                cursor: Color::LightYellow,
                winner: Color::LightGreen,
            },
        }
    }
}
