//! Terminal setup and the main event loop.

use crate::app::{App, Control};
use crate::config::AppConfig;
use crate::scheduler::ComputerScheduler;
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tictactoe_engine::ComputerTurn;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the game until the player quits, restoring the terminal afterwards.
pub async fn run(config: AppConfig) -> Result<()> {
    info!("Starting tic-tac-toe TUI");

    enable_raw_mode()?;
    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            error!(error = ?e, "Terminal setup failed");
            if let Err(restore) = restore_terminal() {
                error!(error = ?restore, "Failed to restore terminal");
            }
            return Err(e);
        }
    };

    let (scheduler, mut turns) = ComputerScheduler::new(config.computer_delay());
    let mut app = App::new(&config);

    let res = run_app(&mut terminal, &mut app, &scheduler, &mut turns).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(
        x = app.engine().scores().x(),
        o = app.engine().scores().o(),
        "Session finished"
    );
    res
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Leaves raw mode and the alternate screen. Safe to call when only part of
/// the setup happened.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[instrument(skip_all, fields(delay_ms = scheduler.delay().as_millis() as u64))]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    scheduler: &ComputerScheduler,
    turns: &mut mpsc::UnboundedReceiver<ComputerTurn>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(turn) = turns.try_recv() {
            app.run_computer_turn(turn);
        }

        if let Some(turn) = app.due_computer_turn() {
            scheduler.schedule(turn);
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore release)
                if key.kind == KeyEventKind::Press && app.handle_key(key) == Control::Quit {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }

        tokio::task::yield_now().await;
    }
}
