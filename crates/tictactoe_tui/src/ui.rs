//! Stateless UI rendering.

use crate::app::{App, Screen};
use crate::names::{NameField, NameForm};
use crate::theme::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tictactoe_engine::{GameEngine, Player, Position, Square};

const HELP: &str = "←↑↓→ move · Enter/1-9 place · r new game · R reset scores · c mode · t theme · n names · q quit";

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = app.theme().palette();
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    match app.screen() {
        Screen::NameEntry(form) => draw_name_form(frame, area, form, &palette),
        Screen::Playing => draw_game(frame, area, app, &palette),
    }
}

fn draw_game(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + names
            Constraint::Length(1), // Scores
            Constraint::Min(11),   // Board
            Constraint::Length(1), // Celebration
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let engine = app.engine();

    let header = vec![
        Line::from(Span::styled(
            "Tic Tac Toe",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{}  ·  {}", app.names().headline(), engine.mode())),
    ];
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), chunks[0]);

    let scores = Line::from(vec![
        Span::styled(format!("❌ {}", engine.scores().x()), Style::default().fg(palette.x)),
        Span::raw("   "),
        Span::styled(format!("⭕ {}", engine.scores().o()), Style::default().fg(palette.o)),
    ]);
    frame.render_widget(Paragraph::new(scores).alignment(Alignment::Center), chunks[1]);

    draw_board(frame, chunks[2], engine, app.cursor(), palette);

    if let Some(celebration) = app.celebration() {
        frame.render_widget(
            Paragraph::new(celebration.line(chunks[3].width)).alignment(Alignment::Center),
            chunks[3],
        );
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(palette.accent))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[4]);

    frame.render_widget(
        Paragraph::new(HELP)
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center),
        chunks[5],
    );

    if let Some(message) = app.popup() {
        draw_popup(frame, area, message, palette);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, engine: &GameEngine, cursor: Position, palette: &Palette) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, cells) in Position::ALL.chunks(3).enumerate() {
        draw_row(frame, rows[row * 2], engine, cursor, cells, palette);
        if row < 2 {
            frame.render_widget(
                Paragraph::new("─".repeat(usize::from(board_area.width)))
                    .style(Style::default().fg(palette.muted)),
                rows[row * 2 + 1],
            );
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    engine: &GameEngine,
    cursor: Position,
    positions: &[Position],
    palette: &Palette,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
        ])
        .split(area);

    for (i, &pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[i * 2], engine, cursor, pos, palette);
        if i < 2 {
            let sep = Paragraph::new(vec![Line::from("│"); 3]).style(Style::default().fg(palette.muted));
            frame.render_widget(sep, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, engine: &GameEngine, cursor: Position, pos: Position, palette: &Palette) {
    let (symbol, mut style) = match engine.board().get(pos) {
        Square::Empty => ((pos.to_index() + 1).to_string(), Style::default().fg(palette.muted)),
        Square::Occupied(Player::X) => ("X".to_string(), Style::default().fg(palette.x).add_modifier(Modifier::BOLD)),
        Square::Occupied(Player::O) => ("O".to_string(), Style::default().fg(palette.o).add_modifier(Modifier::BOLD)),
    };

    if engine.winning_line().is_some_and(|line| line.contains(&pos)) {
        style = style.bg(palette.winner);
    } else if pos == cursor {
        style = style.bg(palette.cursor);
    }

    let lines = vec![Line::from(""), Line::from(symbol), Line::from("")];
    frame.render_widget(Paragraph::new(lines).style(style).alignment(Alignment::Center), area);
}

fn draw_popup(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let popup = center_rect(area, 36, 5);
    frame.render_widget(Clear, popup);

    let text = vec![
        Line::from(Span::styled(message.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Enter or r to play again", Style::default().fg(palette.muted))),
    ];
    let widget = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .title("Game over")
            .borders(Borders::ALL)
            .style(Style::default().bg(palette.background).fg(palette.accent)),
    );
    frame.render_widget(widget, popup);
}

fn draw_name_form(frame: &mut Frame, area: Rect, form: &NameForm, palette: &Palette) {
    let dialog = center_rect(area, 44, 9);
    let block = Block::default()
        .title("Enter player names")
        .borders(Borders::ALL)
        .style(Style::default().fg(palette.accent));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let field_line = |field: NameField, label: &str, color: Color| {
        let focused = form.focus() == field;
        let marker = if focused { "▶ " } else { "  " };
        let value = form.value(field);
        let shown = if value.is_empty() {
            Span::styled(format!("Player {}", label), Style::default().fg(palette.muted))
        } else {
            Span::styled(value.to_string(), Style::default().fg(palette.text))
        };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{}: ", label), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            shown,
            Span::raw(if focused { "_" } else { "" }),
        ])
    };

    let lines = vec![
        Line::from(""),
        field_line(NameField::X, "X", palette.x),
        Line::from(""),
        field_line(NameField::O, "O", palette.o),
        Line::from(""),
        Line::from(Span::styled(
            "Tab switch · Enter start · Esc skip",
            Style::default().fg(palette.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::AppConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|f| draw(f, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(skip_names: bool) -> App {
        let cli = Cli {
            seed: Some(1),
            skip_names,
            player_x: Some("Ada".to_string()),
            ..Cli::default()
        };
        App::new(&AppConfig::resolve(&cli).expect("config"))
    }

    #[test]
    fn test_renders_name_form() {
        let screen = render(&app(false));
        assert!(screen.contains("Enter player names"));
        assert!(screen.contains("Ada"));
    }

    #[test]
    fn test_renders_board_and_scores() {
        let screen = render(&app(true));
        assert!(screen.contains("Ada vs Player O"));
        assert!(screen.contains("Two players"));
        assert!(screen.contains("Ada to move (X)"));
    }

    #[test]
    fn test_renders_popup_after_win() {
        let mut app = app(true);
        for c in ['1', '4', '2', '5', '3'] {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        let screen = render(&app);
        assert!(screen.contains("Game over"));
        assert!(screen.contains("Enter or r to play again"));
    }

    #[test]
    fn test_center_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(center_rect(area, 40, 11), area);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).expect("terminal");
        let app = app(true);
        terminal.draw(|f| draw(f, &app)).expect("draw");
    }
}
