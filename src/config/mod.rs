//! Configuration management for the cmdtree shell
//!
//! This module handles loading, parsing, and saving the shell configuration:
//! - Configuration file (TOML format, `~/.cmdtree/config.toml` by default)
//! - Command-line arguments, which override file values
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::sender::ConsoleSender;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Console sender configuration
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Interactive shell configuration
    #[serde(default)]
    pub shell: ShellConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Command history configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Identity of the local console sender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Sender display name
    #[serde(default = "default_console_name")]
    pub name: String,

    /// Granted permission nodes (`*` suffix grants a whole subtree)
    #[serde(default = "default_console_permissions")]
    pub permissions: Vec<String>,

    /// Operators pass every permission check
    #[serde(default)]
    pub operator: bool,
}

/// Interactive shell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Prompt text shown before the indicator
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Show suggestion tooltips in the completion menu
    #[serde(default = "default_show_tooltips")]
    pub show_tooltips: bool,

    /// Columns of the completion menu
    #[serde(default = "default_menu_columns")]
    pub menu_columns: u16,
}

// Default value functions
fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cmdtree_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_console_name() -> String {
    "console".to_string()
}

fn default_console_permissions() -> Vec<String> {
    vec!["cmdtree.*".to_string()]
}

fn default_prompt() -> String {
    "cmdtree".to_string()
}

fn default_color_output() -> bool {
    true
}

fn default_show_tooltips() -> bool {
    true
}

fn default_menu_columns() -> u16 {
    4
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            name: default_console_name(),
            permissions: default_console_permissions(),
            operator: false,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            color_output: default_color_output(),
            show_tooltips: default_show_tooltips(),
            menu_columns: default_menu_columns(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// An explicitly given path must exist. Without a path the default location is
    /// tried and a missing file yields the defaults.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Serialize to a TOML string
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cmdtree")
            .join("config.toml")
    }

    /// Save configuration to a file, creating parent directories
    ///
    /// # Arguments
    /// * `path` - Path where to save the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.history.max_size == 0 {
            return Err(invalid("history.max_size", "0"));
        }
        if self.console.name.trim().is_empty() {
            return Err(invalid("console.name", &self.console.name));
        }
        if let Some(bad) = self
            .console
            .permissions
            .iter()
            .find(|p| p.is_empty() || p.chars().any(char::is_whitespace))
        {
            return Err(invalid("console.permissions", bad));
        }
        if self.shell.menu_columns == 0 {
            return Err(invalid("shell.menu_columns", "0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str) -> crate::error::CmdTreeError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

impl ConsoleConfig {
    /// Build the console sender this section describes
    pub fn sender(&self) -> ConsoleSender {
        ConsoleSender::new(self.name.clone())
            .with_permissions(self.permissions.iter().cloned())
            .with_operator(self.operator)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
