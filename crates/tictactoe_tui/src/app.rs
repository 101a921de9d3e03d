//! Application state and logic.

use crate::celebration::Celebration;
use crate::config::AppConfig;
use crate::input::{self, Command};
use crate::names::{NameForm, PlayerNames};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictactoe_engine::{ComputerTurn, GameEngine, GameEvent, GameRng, GameStatus, Player, Position};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Collecting player names.
    NameEntry(NameForm),
    /// The board.
    Playing,
}

/// Whether the main loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the program.
    Quit,
}

/// Main application state.
pub struct App {
    engine: GameEngine,
    events: mpsc::UnboundedReceiver<GameEvent>,
    names: PlayerNames,
    screen: Screen,
    cursor: Position,
    theme: Theme,
    popup: Option<String>,
    celebration: Option<Celebration>,
    status_message: String,
    pending_turn: Option<ComputerTurn>,
    fx_rng: GameRng,
}

impl App {
    /// Creates the application from resolved configuration.
    #[instrument(skip(config))]
    pub fn new(config: &AppConfig) -> Self {
        let mut engine = match config.seed() {
            Some(seed) => GameEngine::with_seed(*config.mode(), *seed),
            None => GameEngine::new(*config.mode()),
        };
        let fx_rng = match config.seed() {
            Some(seed) => GameRng::new(seed.wrapping_add(1)),
            None => GameRng::from_entropy(),
        };

        let (tx, events) = mpsc::unbounded_channel();
        engine.subscribe(move |event: &GameEvent| {
            // The receiver lives as long as the App that owns the engine.
            let _ = tx.send(*event);
        });

        let screen = if *config.ask_names() {
            Screen::NameEntry(NameForm::prefilled(config.player_x(), config.player_o()))
        } else {
            Screen::Playing
        };

        let mut app = Self {
            engine,
            events,
            names: PlayerNames::new(config.player_x(), config.player_o()),
            screen,
            cursor: Position::Center,
            theme: *config.theme(),
            popup: None,
            celebration: None,
            status_message: String::new(),
            pending_turn: None,
            fx_rng,
        };
        app.status_message = app.turn_message();
        app
    }

    /// The engine, read-only.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Current player names.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// The screen being shown.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Game-over message, while it is showing.
    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    /// Emoji shower for the finished game.
    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// Line shown under the board.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if let Screen::NameEntry(form) = &mut self.screen {
            return match Self::handle_name_key(form, key, &mut self.names) {
                None => Control::Continue,
                Some(Control::Quit) => Control::Quit,
                Some(Control::Continue) => {
                    self.screen = Screen::Playing;
                    self.status_message = self.turn_message();
                    Control::Continue
                }
            };
        }

        let Some(command) = input::command_for(key) else {
            return Control::Continue;
        };
        self.apply_command(command)
    }

    /// Returns `Some(Control)` when the form is finished (submitted or quit).
    fn handle_name_key(form: &mut NameForm, key: KeyEvent, names: &mut PlayerNames) -> Option<Control> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Control::Quit);
        }
        match key.code {
            KeyCode::Enter => {
                *names = form.submit();
                info!(names = %names.headline(), "Players named");
                Some(Control::Continue)
            }
            // Keep whatever names were set before
            KeyCode::Esc => Some(Control::Continue),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                form.switch_focus();
                None
            }
            KeyCode::Backspace => {
                form.backspace();
                None
            }
            KeyCode::Char(c) => {
                form.push(c);
                None
            }
            _ => None,
        }
    }

    fn apply_command(&mut self, command: Command) -> Control {
        match command {
            Command::Quit => return Control::Quit,
            Command::Cursor(key) => self.cursor = input::move_cursor(self.cursor, key),
            Command::PlaceAtCursor if self.popup.is_some() => self.engine.reset_board(),
            Command::PlaceAtCursor => self.place(self.cursor),
            Command::PlaceAt(position) => {
                self.cursor = position;
                self.place(position);
            }
            Command::ResetBoard => self.engine.reset_board(),
            Command::ResetScores => self.engine.reset_scores(),
            Command::ToggleMode => self.engine.set_mode(self.engine.mode().toggle()),
            Command::ToggleTheme => self.theme = self.theme.toggle(),
            Command::EditNames => {
                self.screen = Screen::NameEntry(NameForm::prefilled(
                    self.names.get(Player::X),
                    self.names.get(Player::O),
                ));
            }
        }
        self.sync_events();
        Control::Continue
    }

    fn place(&mut self, position: Position) {
        if let Err(e) = self.engine.place_mark(position) {
            debug!(error = %e, %position, "Placement ignored");
        }
    }

    /// Applies engine events queued since the last call.
    pub fn sync_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.on_game_event(event);
        }
    }

    fn on_game_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");
        match event {
            GameEvent::MoveApplied { position, mark } => {
                self.status_message = format!("{} played {}", self.names.get(mark), position.label());
            }
            GameEvent::GameEnded { status, .. } => {
                let message = match status {
                    GameStatus::Won(winner) => format!("{} wins! 🎉", self.names.get(winner)),
                    _ => "It's a Draw 🤝".to_string(),
                };
                info!(%message, "Game over");
                self.popup = Some(message.clone());
                self.status_message = message;
                self.celebration = Celebration::for_status(status, &mut self.fx_rng);
            }
            GameEvent::Reset { scores_cleared } => {
                self.popup = None;
                self.celebration = None;
                self.pending_turn = None;
                self.status_message = if scores_cleared {
                    format!("Scores cleared. {}", self.turn_message())
                } else {
                    self.turn_message()
                };
            }
        }
    }

    fn turn_message(&self) -> String {
        let player = self.engine.current_player();
        format!("{} to move ({})", self.names.get(player), player)
    }

    /// Claims a computer turn that is due and not yet scheduled.
    ///
    /// Nothing is due while the name form is open.
    pub fn due_computer_turn(&mut self) -> Option<ComputerTurn> {
        if matches!(self.screen, Screen::NameEntry(_)) {
            return None;
        }
        let turn = self.engine.schedule_computer_turn()?;
        if self.pending_turn == Some(turn) {
            return None;
        }
        self.pending_turn = Some(turn);
        if !self.engine.status().is_over() {
            self.status_message = format!("{} is thinking...", self.names.get(self.engine.current_player()));
        }
        Some(turn)
    }

    /// Plays a delivered computer turn, unless a reset made it stale.
    #[instrument(skip(self))]
    pub fn run_computer_turn(&mut self, turn: ComputerTurn) {
        if self.pending_turn == Some(turn) {
            self.pending_turn = None;
        }
        if matches!(self.screen, Screen::NameEntry(_)) {
            // Rescheduled once the form closes
            debug!("Holding computer turn while names are edited");
            return;
        }
        if self.engine.run_computer_turn(turn).is_some() {
            self.sync_events();
            if !self.engine.status().is_over() {
                self.status_message = format!("{}. {}", self.status_message, self.turn_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use tictactoe_engine::{GameMode, Square};

    fn app(mode: GameMode, ask_names: bool) -> App {
        let cli = Cli {
            mode: Some(mode),
            seed: Some(17),
            skip_names: !ask_names,
            ..Cli::default()
        };
        App::new(&AppConfig::resolve(&cli).expect("config"))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_name_entry_then_play() {
        let mut app = app(GameMode::TwoPlayer, true);
        assert!(matches!(app.screen(), Screen::NameEntry(_)));

        type_text(&mut app, "Ada");
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(*app.screen(), Screen::Playing);
        assert_eq!(app.names().headline(), "Ada vs Player O");
        assert_eq!(app.status_message(), "Ada to move (X)");
    }

    #[test]
    fn test_digit_keys_play_and_win_shows_popup() {
        let mut app = app(GameMode::TwoPlayer, false);
        for c in ['1', '4', '2', '5', '3'] {
            app.handle_key(press(KeyCode::Char(c)));
        }

        assert_eq!(*app.engine().status(), GameStatus::Won(Player::X));
        assert_eq!(app.popup(), Some("Player X wins! 🎉"));
        assert!(app.celebration().is_some());
    }

    #[test]
    fn test_enter_on_popup_restarts() {
        let mut app = app(GameMode::TwoPlayer, false);
        for c in ['1', '4', '2', '5', '3'] {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.popup(), None);
        assert_eq!(app.engine().board().filled(), 0);
        assert_eq!(*app.engine().scores().x(), 1);
    }

    #[test]
    fn test_full_reset_key_zeroes_scores() {
        let mut app = app(GameMode::TwoPlayer, false);
        for c in ['1', '4', '2', '5', '3'] {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Char('R')));

        assert_eq!(*app.engine().scores().x(), 0);
        assert!(app.status_message().starts_with("Scores cleared."));
    }

    #[test]
    fn test_cursor_and_enter_place_mark() {
        let mut app = app(GameMode::TwoPlayer, false);
        app.handle_key(press(KeyCode::Up));
        app.handle_key(press(KeyCode::Left));
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.cursor(), Position::TopLeft);
        assert_eq!(app.engine().board().get(Position::TopLeft), Square::Occupied(Player::X));
    }

    #[test]
    fn test_computer_turn_scheduled_once() {
        let mut app = app(GameMode::VsComputer, false);
        app.handle_key(press(KeyCode::Char('5')));

        let turn = app.due_computer_turn().expect("computer is due");
        assert_eq!(app.due_computer_turn(), None);
        assert!(app.status_message().ends_with("is thinking..."));

        app.run_computer_turn(turn);
        assert_eq!(app.engine().board().filled(), 2);
        assert_eq!(app.engine().current_player(), Player::X);
    }

    #[test]
    fn test_computer_turn_status_separates_sentences() {
        let mut app = app(GameMode::VsComputer, false);
        app.handle_key(press(KeyCode::Char('5')));
        let turn = app.due_computer_turn().expect("computer is due");
        app.run_computer_turn(turn);

        let status = app.status_message();
        assert!(status.starts_with("Player O played "), "{}", status);
        assert!(status.ends_with(". Player X to move (X)"), "{}", status);
    }

    #[test]
    fn test_name_form_holds_computer_turn() {
        let mut app = app(GameMode::VsComputer, false);
        app.handle_key(press(KeyCode::Char('5')));
        let turn = app.due_computer_turn().expect("computer is due");

        app.handle_key(press(KeyCode::Char('n')));
        app.run_computer_turn(turn);
        assert_eq!(app.engine().board().filled(), 1);
        assert_eq!(app.due_computer_turn(), None);

        app.handle_key(press(KeyCode::Enter));
        let turn = app.due_computer_turn().expect("computer is due again");
        app.run_computer_turn(turn);
        assert_eq!(app.engine().board().filled(), 2);
    }

    #[test]
    fn test_mode_toggle_discards_pending_turn() {
        let mut app = app(GameMode::VsComputer, false);
        app.handle_key(press(KeyCode::Char('5')));
        let turn = app.due_computer_turn().expect("computer is due");

        app.handle_key(press(KeyCode::Char('c')));
        app.run_computer_turn(turn);

        assert_eq!(app.engine().mode(), GameMode::TwoPlayer);
        assert_eq!(app.engine().board().filled(), 0);
    }

    #[test]
    fn test_theme_toggle_and_quit() {
        let mut app = app(GameMode::TwoPlayer, false);
        app.handle_key(press(KeyCode::Char('t')));
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(app.handle_key(press(KeyCode::Char('q'))), Control::Quit);
    }
}
