//! Session configuration: TOML file first, command-line flags on top.

use crate::cli::Cli;
use crate::theme::Theme;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tictactoe_engine::GameMode;
use tracing::{debug, info, instrument};

/// Settings for one run of the game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name for X; blank means "Player X".
    #[serde(default)]
    player_x: String,

    /// Name for O; blank means "Player O".
    #[serde(default)]
    player_o: String,

    /// Mode at start-up.
    #[serde(default)]
    mode: GameMode,

    /// Theme at start-up.
    #[serde(default)]
    theme: Theme,

    /// Delay before the computer moves, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Fixed seed for the computer opponent.
    #[serde(default)]
    seed: Option<u64>,

    /// Where logs go; the terminal itself is busy drawing the board.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Show the name form before the first game.
    #[serde(default = "default_ask_names")]
    ask_names: bool,
}

fn default_computer_delay_ms() -> u64 {
    500
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe.log")
}

fn default_ask_names() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_x: String::new(),
            player_o: String::new(),
            mode: GameMode::default(),
            theme: Theme::default(),
            computer_delay_ms: default_computer_delay_ms(),
            seed: None,
            log_file: default_log_file(),
            ask_names: default_ask_names(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Builds the effective configuration for a command line: the file named
    /// by `--config` (or defaults), then every flag that was given.
    #[instrument(skip(cli))]
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        info!(mode = %config.mode, theme = %config.theme, seed = ?config.seed, "Configuration resolved");
        Ok(config)
    }

    /// Replaces fields with any values given on the command line.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(name) = &cli.player_x {
            self.player_x = name.clone();
        }
        if let Some(name) = &cli.player_o {
            self.player_o = name.clone();
        }
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(theme) = cli.theme {
            self.theme = theme;
        }
        if let Some(delay) = cli.delay_ms {
            self.computer_delay_ms = delay;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = path.clone();
        }
        if cli.skip_names {
            self.ask_names = false;
        }
    }

    /// The computer's delay as a [`Duration`].
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
