//! Command-line interface for cmdtree
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - One-shot subcommands (exec, complete, list, config, completion, version)
//! - Mode selection (interactive shell when no subcommand is given)

pub mod completion;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::Result;
use crate::repl::Session;

/// Command tree shell
#[derive(Parser, Debug)]
#[command(
    name = "cmdtree",
    version,
    about = "Interactive command tree shell",
    long_about = "Dispatches command lines against a tree of literal and typed argument nodes,
with permission-aware help, usage rendering and tab completion."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Sender name, overriding the configured console name
    #[arg(long = "as", value_name = "NAME")]
    pub sender_name: Option<String>,

    /// Run as an operator (every permission check passes)
    #[arg(long)]
    pub op: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for cmdtree
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute one command line and exit
    Exec {
        /// Command line words, joined with single spaces
        #[arg(value_name = "LINE", required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },

    /// Print completion suggestions for a partial command line
    Complete {
        /// Partial command line
        #[arg(value_name = "LINE", default_value = "", allow_hyphen_values = true)]
        line: String,

        /// Cursor position in bytes (defaults to the end of the line)
        #[arg(long, value_name = "POS")]
        cursor: Option<usize>,

        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the commands available to the sender
    List {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// One suggestion as printed by `complete --json`
#[derive(Debug, Serialize)]
struct SuggestionOutput<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<&'a str>,
    start: usize,
    end: usize,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        Self::from_args(args)
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    ///
    /// # Returns
    /// * `&Config` - Reference to configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    ///
    /// # Returns
    /// * `&CliArgs` - Reference to arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    ///
    /// # Arguments
    /// * `config` - Configuration to modify
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
        Self::apply_console_args(config, args);
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if args.no_color {
            config.shell.color_output = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Apply sender-related CLI arguments to configuration
    fn apply_console_args(config: &mut Config, args: &CliArgs) {
        if let Some(name) = &args.sender_name {
            config.console.name = name.clone();
        }
        if args.op {
            config.console.operator = true;
        }
    }

    /// Handle subcommands
    ///
    /// # Arguments
    /// * `session` - Dispatcher and sender used by `exec`, `complete` and `list`
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub async fn handle_subcommand(&self, session: &Session) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Exec { line }) => {
                let line = line.join(" ");
                session
                    .dispatcher()
                    .execute(session.sender().as_ref(), &line)?;
                Ok(true)
            }
            Some(Commands::Complete { line, cursor, json }) => {
                println!("{}", Self::render_suggestions(session, line, *cursor, *json).await?);
                Ok(true)
            }
            Some(Commands::List { json }) => {
                println!("{}", Self::render_command_list(session, *json)?);
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Suggestions for `line`, one per output line or as a JSON array
    async fn render_suggestions(
        session: &Session,
        line: &str,
        cursor: Option<usize>,
        json: bool,
    ) -> Result<String> {
        let cursor = cursor.unwrap_or(line.len());
        let suggestions = session
            .dispatcher()
            .suggestions_at(session.sender().as_ref(), line, cursor)
            .await;

        if json {
            let output: Vec<SuggestionOutput<'_>> = suggestions
                .list()
                .iter()
                .map(|s| SuggestionOutput {
                    text: s.text(),
                    tooltip: s.tooltip(),
                    start: s.range().start(),
                    end: s.range().end(),
                })
                .collect();
            return serde_json::to_string_pretty(&output).map_err(|e| e.to_string().into());
        }

        Ok(suggestions.texts().join("\n"))
    }

    /// Usable commands as `usage - description` lines or as JSON
    fn render_command_list(session: &Session, json: bool) -> Result<String> {
        let entries = session.dispatcher().help_entries(session.sender().as_ref());
        if json {
            return serde_json::to_string_pretty(&entries).map_err(|e| e.to_string().into());
        }

        Ok(entries
            .iter()
            .map(|entry| format!("{} - {}", entry.usage, entry.description))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Show version information
    fn show_version(&self) {
        println!("cmdtree version {}", env!("CARGO_PKG_VERSION"));
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml_string()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print banner with version and sender info
    pub fn print_banner(&self, commands: usize) {
        if !self.args.quiet {
            println!("cmdtree {}", env!("CARGO_PKG_VERSION"));
            println!(
                "Running as '{}' with {} commands. Type 'help' for a list, 'exit' to leave.",
                self.config.console.name, commands
            );
        }
    }
}
