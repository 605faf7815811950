//! Client configuration.
//!
//! Layers, lowest first: built-in defaults, an optional TOML file, the
//! environment (`API_URL`, `TICTAC_BOARD_SIZE`, `TICTAC_RESTART_DELAY_MS`),
//! then explicit overrides from the command line.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Smallest board side the client will ask for.
pub const MIN_BOARD_SIZE: usize = 3;

/// Configuration for the tic-tac-toe client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ClientConfig {
    /// Base URL of the remote mover.
    #[serde(default = "default_api_url")]
    #[setters(into)]
    api_url: String,

    /// Board side length for new games.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Delay before a finished game restarts, in milliseconds.
    #[serde(default = "default_restart_delay_ms")]
    restart_delay_ms: u64,

    /// Per-request timeout, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_board_size() -> usize {
    3
}

fn default_restart_delay_ms() -> u64 {
    2500
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            board_size: default_board_size(),
            restart_delay_ms: default_restart_delay_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(api_url = %config.api_url, "Config loaded successfully");
        Ok(config)
    }

    /// Defaults or `path`, with environment overrides applied.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()
    }

    /// Applies overrides from process environment variables.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn apply_vars(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup("API_URL").filter(|url| !url.trim().is_empty()) {
            debug!(api_url = %url, "API_URL override");
            self.api_url = url;
        }

        if let Some(size) = lookup("TICTAC_BOARD_SIZE") {
            self.board_size = size.trim().parse().map_err(|e| {
                ConfigError::new(format!("TICTAC_BOARD_SIZE is not a number: {}", e))
            })?;
        }

        if let Some(delay) = lookup("TICTAC_RESTART_DELAY_MS") {
            self.restart_delay_ms = delay.trim().parse().map_err(|e| {
                ConfigError::new(format!("TICTAC_RESTART_DELAY_MS is not a number: {}", e))
            })?;
        }

        Ok(self)
    }

    /// Checks the values are usable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::new(format!(
                "board_size must be at least {}, got {}",
                MIN_BOARD_SIZE, self.board_size
            )));
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "api_url must be an http(s) URL, got {:?}",
                self.api_url
            )));
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::new("request_timeout_ms must be positive".to_string()));
        }

        Ok(())
    }

    /// Restart delay after a finished game.
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    /// Timeout for each remote call.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
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
