//! Command-line interface for the terminal game.

use crate::theme::Theme;
use clap::Parser;
use std::path::PathBuf;
use tictactoe_engine::GameMode;

/// Tic-tac-toe in the terminal, for two players or against the computer
#[derive(Parser, Debug, Default)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with scores, themes and a random computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Game mode (two_player or vs_computer)
    #[arg(short, long)]
    pub mode: Option<GameMode>,

    /// Name shown for X
    #[arg(long)]
    pub player_x: Option<String>,

    /// Name shown for O
    #[arg(long)]
    pub player_o: Option<String>,

    /// Seed for the computer opponent, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds the computer waits before moving
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Color theme (dark or light)
    #[arg(long)]
    pub theme: Option<Theme>,

    /// File to write logs to
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Start playing without asking for names
    #[arg(long)]
    pub skip_names: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_overrides() {
        let cli = Cli::try_parse_from([
            "tictactoe",
            "--mode",
            "vs_computer",
            "--player-x",
            "Ada",
            "--seed",
            "9",
            "--theme",
            "light",
            "--skip-names",
        ])
        .expect("valid args");

        assert_eq!(cli.mode, Some(GameMode::VsComputer));
        assert_eq!(cli.player_x.as_deref(), Some("Ada"));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.theme, Some(Theme::Light));
        assert!(cli.skip_names);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["tictactoe", "--mode", "online"]).is_err());
    }
}
