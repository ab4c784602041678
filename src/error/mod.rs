//! Error handling module for cmdtree.
//!
//! This module provides the error taxonomy for command dispatch:
//! - Dispatch errors distinguishing "nothing matched", "matched but denied" and
//!   "matched but malformed"
//! - Typed argument decode failures with a sub-kind
//! - Executor failures, which propagate to the caller untouched
//! - Build and configuration errors
//!
//! # Example
//!
//! ```rust,no_run
//! use cmdtree::error::{CmdTreeError, DispatchError, Result};
//!
//! fn report(result: Result<i32>) {
//!     match result {
//!         Ok(code) => println!("ok: {code}"),
//!         Err(CmdTreeError::Dispatch(DispatchError::UnknownCommand(label))) => {
//!             eprintln!("no such command: {label}")
//!         }
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{
    ArgumentParseError, BuildError, CmdTreeError, CommandError, ConfigError, DispatchError,
    ParseErrorKind, Result,
};
