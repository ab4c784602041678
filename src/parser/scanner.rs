//! Cursor scanner for command input
//!
//! A small, forgiving scanner over a borrowed input line. The only mutable state is
//! the byte cursor, so a trial parse is just "remember `cursor()`, try, and
//! `set_cursor()` on failure". Copying the scanner forks it.
//!
//! # Design Principles
//!
//! - **Never panic** - every read is bounds-checked and returns `None` at the end
//! - **Char boundaries** - the cursor only ever lands between UTF-8 characters
//! - **No side effects** - reading moves the cursor and nothing else

use crate::error::{ArgumentParseError, ParseErrorKind};

const DOUBLE_QUOTE: char = '"';
const SINGLE_QUOTE: char = '\'';
const ESCAPE: char = '\\';

/// Mutable-position scanner over a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorScanner<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> CursorScanner<'a> {
    /// Create a new scanner positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    /// The full input line
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Current byte offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `cursor`, clamped to the input length and snapped back to
    /// the nearest char boundary
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.input.len());
        while !self.input.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    /// Total length of the input in bytes
    pub fn total_len(&self) -> usize {
        self.input.len()
    }

    /// Unread portion of the input
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    /// Already consumed portion of the input
    pub fn consumed(&self) -> &'a str {
        &self.input[..self.cursor]
    }

    /// Whether at least one more character can be read
    pub fn can_read(&self) -> bool {
        self.cursor < self.input.len()
    }

    /// Look at the next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consume and return the next character
    pub fn read(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.cursor += ch.len_utf8();
        Some(ch)
    }

    /// Skip one character if present
    pub fn skip(&mut self) {
        let _ = self.read();
    }

    /// Whether the next character is whitespace
    pub fn at_whitespace(&self) -> bool {
        self.peek().is_some_and(char::is_whitespace)
    }

    /// Whether the cursor sits on a token boundary (whitespace or end of input)
    pub fn at_boundary(&self) -> bool {
        !self.can_read() || self.at_whitespace()
    }

    /// Consume all consecutive whitespace
    pub fn skip_whitespace(&mut self) {
        while self.at_whitespace() {
            self.skip();
        }
    }

    /// Consume characters until whitespace or end of input
    pub fn read_unquoted_string(&mut self) -> &'a str {
        let start = self.cursor;
        while self.can_read() && !self.at_whitespace() {
            self.skip();
        }
        &self.input[start..self.cursor]
    }

    /// Consume a quoted string delimited by `"` or `'`
    ///
    /// Inside the quotes a backslash may escape the active delimiter or another
    /// backslash. At end of input an empty string is returned.
    ///
    /// # Errors
    /// * `ExpectedQuote` - the next character is not a quote
    /// * `InvalidEscape` - backslash followed by anything else
    /// * `UnterminatedQuote` - input ended before the closing delimiter
    ///
    /// The cursor is left where the failure was detected; callers that want to retry
    /// restore it themselves.
    pub fn read_quoted_string(&mut self) -> Result<String, ArgumentParseError> {
        let Some(quote) = self.peek() else {
            return Ok(String::new());
        };
        if !is_quote(quote) {
            return Err(ArgumentParseError::new(
                ParseErrorKind::ExpectedQuote,
                "Expected quote to start a string",
                self.cursor,
            ));
        }
        self.skip();
        self.read_string_until(quote)
    }

    fn read_string_until(&mut self, terminator: char) -> Result<String, ArgumentParseError> {
        let mut result = String::new();
        let mut escaped = false;
        while let Some(ch) = self.read() {
            if escaped {
                if ch == terminator || ch == ESCAPE {
                    result.push(ch);
                    escaped = false;
                } else {
                    let at = self.cursor - ch.len_utf8();
                    self.set_cursor(at);
                    return Err(ArgumentParseError::new(
                        ParseErrorKind::InvalidEscape,
                        format!("Invalid escape sequence '{ch}' in quoted string"),
                        at,
                    ));
                }
            } else if ch == ESCAPE {
                escaped = true;
            } else if ch == terminator {
                return Ok(result);
            } else {
                result.push(ch);
            }
        }

        Err(ArgumentParseError::new(
            ParseErrorKind::UnterminatedQuote,
            "Unclosed quoted string",
            self.cursor,
        ))
    }

    /// Read a quoted string if the next character is a quote, otherwise a bare word
    pub fn read_string(&mut self) -> Result<String, ArgumentParseError> {
        match self.peek() {
            Some(ch) if is_quote(ch) => self.read_quoted_string(),
            _ => Ok(self.read_unquoted_string().to_string()),
        }
    }

    /// Consume everything up to the end of input
    pub fn read_remaining(&mut self) -> &'a str {
        let rest = self.remaining();
        self.cursor = self.input.len();
        rest
    }
}

/// Whether `ch` starts a quoted string
pub fn is_quote(ch: char) -> bool {
    ch == DOUBLE_QUOTE || ch == SINGLE_QUOTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_read() {
        let mut scanner = CursorScanner::new("ab");
        assert_eq!(scanner.peek(), Some('a'));
        assert_eq!(scanner.read(), Some('a'));
        assert_eq!(scanner.read(), Some('b'));
        assert_eq!(scanner.read(), None);
        assert_eq!(scanner.peek(), None);
        assert_eq!(scanner.cursor(), 2);
    }

    #[test]
    fn test_skip_whitespace_and_words() {
        let mut scanner = CursorScanner::new("give   steve diamond");
        assert_eq!(scanner.read_unquoted_string(), "give");
        scanner.skip_whitespace();
        assert_eq!(scanner.read_unquoted_string(), "steve");
        scanner.skip_whitespace();
        assert_eq!(scanner.read_unquoted_string(), "diamond");
        assert!(!scanner.can_read());
    }

    #[test]
    fn test_unquoted_at_end_is_empty() {
        let mut scanner = CursorScanner::new("x");
        scanner.skip();
        assert_eq!(scanner.read_unquoted_string(), "");
    }

    #[test]
    fn test_quoted_string_with_escapes() {
        let mut scanner = CursorScanner::new(r#""hello \"world\"""#);
        assert_eq!(scanner.read_quoted_string().unwrap(), r#"hello "world""#);
        assert!(!scanner.can_read());
    }

    #[test]
    fn test_single_quoted_string() {
        let mut scanner = CursorScanner::new(r"'it\'s \\ here' rest");
        assert_eq!(scanner.read_quoted_string().unwrap(), r"it's \ here");
        assert_eq!(scanner.remaining(), " rest");
    }

    #[test]
    fn test_other_quote_inside_needs_no_escape() {
        let mut scanner = CursorScanner::new(r#"'say "hi"'"#);
        assert_eq!(scanner.read_quoted_string().unwrap(), r#"say "hi""#);
    }

    #[test]
    fn test_unterminated_quote() {
        let mut scanner = CursorScanner::new("\"never closed");
        let err = scanner.read_quoted_string().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedQuote);
    }

    #[test]
    fn test_invalid_escape() {
        let mut scanner = CursorScanner::new(r#""bad \n escape""#);
        let err = scanner.read_quoted_string().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidEscape);
        assert_eq!(err.cursor, 6);
    }

    #[test]
    fn test_expected_quote() {
        let mut scanner = CursorScanner::new("plain");
        let err = scanner.read_quoted_string().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedQuote);
        assert_eq!(scanner.cursor(), 0);
    }

    #[test]
    fn test_read_string_falls_back_to_word() {
        let mut scanner = CursorScanner::new("word \"two words\"");
        assert_eq!(scanner.read_string().unwrap(), "word");
        scanner.skip_whitespace();
        assert_eq!(scanner.read_string().unwrap(), "two words");
    }

    #[test]
    fn test_read_remaining() {
        let mut scanner = CursorScanner::new("echo hello there  world");
        scanner.read_unquoted_string();
        scanner.skip_whitespace();
        assert_eq!(scanner.read_remaining(), "hello there  world");
        assert!(!scanner.can_read());
    }

    #[test]
    fn test_save_and_restore() {
        let mut scanner = CursorScanner::new("alpha beta");
        let saved = scanner.cursor();
        scanner.read_unquoted_string();
        scanner.set_cursor(saved);
        assert_eq!(scanner.read_unquoted_string(), "alpha");
    }

    #[test]
    fn test_fork_is_independent() {
        let mut scanner = CursorScanner::new("alpha beta");
        let mut fork = scanner;
        fork.read_unquoted_string();
        assert_eq!(scanner.cursor(), 0);
        assert_eq!(fork.cursor(), 5);
        scanner.skip();
        assert_eq!(scanner.cursor(), 1);
    }

    #[test]
    fn test_set_cursor_clamps_and_snaps() {
        let mut scanner = CursorScanner::new("é!");
        scanner.set_cursor(1);
        assert_eq!(scanner.cursor(), 0);
        scanner.set_cursor(99);
        assert_eq!(scanner.cursor(), 3);
    }

    #[test]
    fn test_boundary_detection() {
        let mut scanner = CursorScanner::new("a b");
        assert!(!scanner.at_boundary());
        scanner.skip();
        assert!(scanner.at_boundary());
        scanner.set_cursor(3);
        assert!(scanner.at_boundary());
    }
}
