//! Keyboard mapping: cursor movement and commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictactoe_engine::Position;

/// What a key press asks for while a game is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor.
    Cursor(KeyCode),
    /// Place a mark under the cursor.
    PlaceAtCursor,
    /// Place a mark on a numbered cell (1-9 on the keyboard).
    PlaceAt(Position),
    /// New game, scores kept.
    ResetBoard,
    /// New game, scores zeroed.
    ResetScores,
    /// Switch between two-player and vs-computer.
    ToggleMode,
    /// Switch between dark and light palettes.
    ToggleTheme,
    /// Re-open the name form.
    EditNames,
    /// Leave the program.
    Quit,
}

/// Maps a key press to a game command.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Command::Cursor(key.code)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::PlaceAtCursor),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| Position::from_index(d as usize - 1))
            .map(Command::PlaceAt),
        KeyCode::Char('r') => Some(Command::ResetBoard),
        KeyCode::Char('R') => Some(Command::ResetScores),
        KeyCode::Char('c') => Some(Command::ToggleMode),
        KeyCode::Char('t') => Some(Command::ToggleTheme),
        KeyCode::Char('n') => Some(Command::EditNames),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
