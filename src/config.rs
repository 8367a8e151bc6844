//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority
//! (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BSW_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::MAX_BOARD_DIM;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Board configuration
    #[serde(default)]
    pub board: BoardConfig,
}

impl AppConfig {
    /// Load configuration from the default `config/` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BSW_BOARD__MINES=40 -> board.mines = 40
        figment = figment.merge(Env::prefixed("BSW_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Forces the board shape into a playable range: at least one cell, rows
    /// and columns bounded so the cell count cannot overflow, and fewer
    /// mines than cells so generation terminates.
    pub fn validated(mut self) -> Self {
        let rows = self.board.rows.clamp(1, MAX_BOARD_DIM);
        let cols = self.board.cols.clamp(1, MAX_BOARD_DIM);
        if rows != self.board.rows || cols != self.board.cols {
            log::warn!(
                "Board shape {}x{} out of range, clamping to {}x{}",
                self.board.rows,
                self.board.cols,
                rows,
                cols
            );
        }
        self.board.rows = rows;
        self.board.cols = cols;

        let cells = self.board.rows * self.board.cols;
        if self.board.mines >= cells {
            log::warn!(
                "{} mines do not fit on a {}x{} board, clamping to {}",
                self.board.mines,
                self.board.rows,
                self.board.cols,
                cells - 1
            );
            self.board.mines = cells - 1;
        }

        self
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Bombsearcher".to_string(),
            width: 1000,
            height: 1000,
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board rows
    pub rows: usize,
    /// Board columns
    pub cols: usize,
    /// Mines placed at generation
    pub mines: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            mines: 10,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
