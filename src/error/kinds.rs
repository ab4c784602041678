use std::{fmt, io};

/// Crate-wide `Result` type using [`CmdTreeError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, CmdTreeError>;

/// Top-level error type for cmdtree operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum CmdTreeError {
    /// Input could not be matched against a command tree.
    Dispatch(DispatchError),

    /// An executor ran and reported a failure.
    Command(CommandError),

    /// A command tree or dispatcher was assembled incorrectly.
    Build(BuildError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Errors produced while matching input against a command tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// First token matches neither the command name nor any alias.
    UnknownCommand(String),

    /// No child matched at some depth while input remained.
    UnknownArgument {
        /// Byte offset where matching stopped.
        position: usize,
        /// The full input line.
        input: String,
        /// Decode failure of the last argument child that was attempted, if any.
        cause: Option<ArgumentParseError>,
    },

    /// Input was exhausted without reaching a node with an executor.
    IncompleteCommand { command: String, usage: String },

    /// The sender failed the command's access check.
    PermissionDenied { command: String },

    /// A typed argument failed to decode outside tree matching.
    ///
    /// Matching reports decode failures through `UnknownArgument::cause`. This
    /// variant is what `?` produces when host code calls `ArgumentType::parse`
    /// directly and returns into a [`CmdTreeError`].
    Argument(ArgumentParseError),
}

/// Sub-kind of an argument decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Numeric value outside the configured `[min, max]`.
    OutOfBounds,

    /// Anything other than `true`/`false` for a boolean.
    InvalidBoolean,

    /// Quoted string without its closing delimiter.
    UnterminatedQuote,

    /// Backslash followed by something other than the delimiter or a backslash.
    InvalidEscape,

    /// Token is not a valid decimal number.
    NotANumber,

    /// A quoted string was required but the input does not start with a quote.
    ExpectedQuote,
}

/// Typed decode failure with a human readable message.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Byte offset in the input where the failing token starts.
    pub cursor: usize,
}

/// Failure reported by an executor.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandError {
    pub message: String,
}

/// Errors raised while assembling command trees and dispatchers.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A greedy argument was given children.
    GreedyArgumentHasChildren(String),

    /// A literal is empty or contains whitespace.
    InvalidLiteral(String),

    /// The same argument name appears twice on one path.
    DuplicateArgument(String),

    /// A command name or alias is already registered.
    DuplicateLabel(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

impl ArgumentParseError {
    /// Create a new decode failure at `cursor`.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, cursor: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            cursor,
        }
    }
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Number of characters of context shown before the failure marker.
const CONTEXT_AMOUNT: usize = 10;

/// Render `...text<--[HERE]` pointing at `position` inside `input`.
fn render_context(input: &str, position: usize) -> String {
    let position = position.min(input.len());
    let before = &input[..position];
    let skipped = before.chars().count().saturating_sub(CONTEXT_AMOUNT);
    let shown: String = before.chars().skip(skipped).collect();
    if skipped > 0 {
        format!("...{shown}<--[HERE]")
    } else {
        format!("{shown}<--[HERE]")
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for CmdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmdTreeError::Dispatch(e) => write!(f, "{e}"),
            CmdTreeError::Command(e) => write!(f, "{e}"),
            CmdTreeError::Build(e) => write!(f, "Build error: {e}"),
            CmdTreeError::Config(e) => write!(f, "Configuration error: {e}"),
            CmdTreeError::Io(e) => write!(f, "I/O error: {e}"),
            CmdTreeError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownCommand(label) => write!(f, "Unknown command: {label}"),
            DispatchError::UnknownArgument {
                position,
                input,
                cause,
            } => {
                match cause {
                    Some(cause) => write!(f, "{}", cause.message)?,
                    None => write!(f, "Incorrect argument for command")?,
                }
                write!(f, " at position {position}: {}", render_context(input, *position))
            }
            DispatchError::IncompleteCommand { command, usage } => {
                write!(f, "Incomplete command '{command}', usage: {usage}")
            }
            DispatchError::PermissionDenied { command } => {
                write!(f, "Permission denied: {command}")
            }
            DispatchError::Argument(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::OutOfBounds => "out of bounds",
            ParseErrorKind::InvalidBoolean => "invalid boolean",
            ParseErrorKind::UnterminatedQuote => "unterminated quote",
            ParseErrorKind::InvalidEscape => "invalid escape",
            ParseErrorKind::NotANumber => "not a number",
            ParseErrorKind::ExpectedQuote => "expected quote",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ArgumentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::GreedyArgumentHasChildren(name) => {
                write!(f, "greedy argument '{name}' must be the last node on its path")
            }
            BuildError::InvalidLiteral(literal) => {
                write!(f, "invalid literal '{literal}': must be non-empty without whitespace")
            }
            BuildError::DuplicateArgument(name) => {
                write!(f, "argument '{name}' appears more than once on a path")
            }
            BuildError::DuplicateLabel(label) => {
                write!(f, "command label '{label}' is already registered")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for CmdTreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CmdTreeError::Dispatch(e) => Some(e),
            CmdTreeError::Command(e) => Some(e),
            CmdTreeError::Build(e) => Some(e),
            CmdTreeError::Config(e) => Some(e),
            CmdTreeError::Io(e) => Some(e),
            CmdTreeError::Generic(_) => None,
        }
    }
}
impl std::error::Error for DispatchError {}
impl std::error::Error for ArgumentParseError {}
impl std::error::Error for CommandError {}
impl std::error::Error for BuildError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to CmdTreeError ========================= */

impl From<io::Error> for CmdTreeError {
    fn from(err: io::Error) -> Self {
        CmdTreeError::Io(err)
    }
}

impl From<DispatchError> for CmdTreeError {
    fn from(err: DispatchError) -> Self {
        CmdTreeError::Dispatch(err)
    }
}

impl From<ArgumentParseError> for CmdTreeError {
    fn from(err: ArgumentParseError) -> Self {
        CmdTreeError::Dispatch(DispatchError::Argument(err))
    }
}

impl From<CommandError> for CmdTreeError {
    fn from(err: CommandError) -> Self {
        CmdTreeError::Command(err)
    }
}

impl From<BuildError> for CmdTreeError {
    fn from(err: BuildError) -> Self {
        CmdTreeError::Build(err)
    }
}

impl From<ConfigError> for CmdTreeError {
    fn from(err: ConfigError) -> Self {
        CmdTreeError::Config(err)
    }
}

impl From<String> for CmdTreeError {
    fn from(msg: String) -> Self {
        CmdTreeError::Generic(msg)
    }
}

impl From<&str> for CmdTreeError {
    fn from(msg: &str) -> Self {
        CmdTreeError::Generic(msg.to_owned())
    }
}

impl From<reedline::ReedlineError> for CmdTreeError {
    fn from(err: reedline::ReedlineError) -> Self {
        CmdTreeError::Generic(format!("Line editor error: {err}"))
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        CommandError { message }
    }
}

impl From<&str> for CommandError {
    fn from(message: &str) -> Self {
        CommandError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_context_short_input() {
        assert_eq!(render_context("give x", 5), "give <--[HERE]");
    }

    #[test]
    fn test_render_context_truncates() {
        let input = "teleport 1 2 three";
        let rendered = render_context(input, 13);
        assert_eq!(rendered, "...eport 1 2 <--[HERE]");
    }

    #[test]
    fn test_unknown_argument_display_with_cause() {
        let err = DispatchError::UnknownArgument {
            position: 5,
            input: "give x".to_string(),
            cause: Some(ArgumentParseError::new(
                ParseErrorKind::NotANumber,
                "Expected integer, got 'x'",
                5,
            )),
        };
        assert_eq!(
            err.to_string(),
            "Expected integer, got 'x' at position 5: give <--[HERE]"
        );
    }

    #[test]
    fn test_command_error_conversion() {
        let err: CmdTreeError = CommandError::new("boom").into();
        assert!(matches!(err, CmdTreeError::Command(_)));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_argument_error_wraps_into_dispatch() {
        let err: CmdTreeError =
            ArgumentParseError::new(ParseErrorKind::InvalidBoolean, "bad", 0).into();
        assert!(matches!(
            err,
            CmdTreeError::Dispatch(DispatchError::Argument(_))
        ));
    }
}
