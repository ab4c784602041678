//! Input scanning and typed argument decoding
//!
//! This module turns raw input lines into typed argument values. It knows nothing
//! about command trees; the tree walker drives it one token at a time.
//!
//! # Architecture
//!
//! - `scanner`: [`CursorScanner`], a cursor over a borrowed input line with
//!   whitespace skipping, unquoted tokens and quoted strings with escapes
//! - `arguments`: [`ArgumentType`] decoders (strings, bounded numbers, booleans)
//!   producing [`ArgumentValue`]s, plus [`FromArgumentValue`] for typed lookup
//!
//! # Examples
//!
//! ```
//! use cmdtree::parser::{ArgumentType, ArgumentValue, CursorScanner};
//!
//! let mut scanner = CursorScanner::new("42 \"hello world\"");
//! let count = ArgumentType::integer_between(1, 64).parse(&mut scanner).unwrap();
//! assert_eq!(count, ArgumentValue::Integer(42));
//!
//! scanner.skip_whitespace();
//! let text = ArgumentType::string().parse(&mut scanner).unwrap();
//! assert_eq!(text, ArgumentValue::String("hello world".to_string()));
//! ```

mod arguments;
mod scanner;

pub use arguments::{ArgumentType, ArgumentValue, FromArgumentValue, StringKind};
pub use scanner::{CursorScanner, is_quote};
