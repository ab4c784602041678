//! Command Tree Library
//!
//! This library provides a command tree parser, dispatcher and autocompletion
//! engine. Commands are trees of literal and typed argument nodes; input lines
//! are matched greedily against the tree, typed values are collected into a
//! context and handed to the executor attached to the matched path.
//!
//! # Modules
//!
//! - `builtin`: Demo command set driven by the shell
//! - `cli`: Command-line interface and argument parsing
//! - `command`: Commands, dispatch, usage rendering and the dispatcher
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `parser`: Cursor scanner and typed argument decoding
//! - `repl`: Interactive REPL engine
//! - `sender`: Who issued a command and what they may do
//! - `suggestion`: Completion suggestions and their builder
//! - `tree`: Tree nodes, builders and the execution context
//!
//! # Example
//!
//! ```no_run
//! use cmdtree::parser::ArgumentType;
//! use cmdtree::sender::ConsoleSender;
//! use cmdtree::tree::{argument, literal};
//! use cmdtree::{Command, CommandDispatcher};
//!
//! fn main() -> cmdtree::Result<()> {
//!     let heal = Command::builder(literal("heal").then(
//!         argument("amount", ArgumentType::integer_between(1, 20)).executes(|ctx| {
//!             let amount = ctx.get::<i32>("amount")?;
//!             ctx.reply(&format!("Healed {amount} hearts"));
//!             Ok(amount)
//!         }),
//!     ))
//!     .description("Restore health")
//!     .build()?;
//!
//!     let mut dispatcher = CommandDispatcher::new();
//!     dispatcher.register(heal)?;
//!
//!     let sender = ConsoleSender::new("console");
//!     assert_eq!(dispatcher.execute(&sender, "heal 5")?, 5);
//!     Ok(())
//! }
//! ```

pub mod builtin;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod parser;
pub mod repl;
pub mod sender;
pub mod suggestion;
pub mod tree;

// Re-export commonly used types
pub use command::{Command, CommandDispatcher, HelpEntry};
pub use config::Config;
pub use error::{CmdTreeError, Result};
pub use repl::{ReplEngine, Session};
pub use sender::{CommandSender, ConsoleSender};
pub use suggestion::{Suggestion, Suggestions, SuggestionsBuilder};
pub use tree::CommandContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
