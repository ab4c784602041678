//! Validator for reedline - keeps reading while a quoted string is open

use reedline::{ValidationResult, Validator};

use crate::parser::is_quote;

/// Treats a line with an unterminated quote as incomplete
pub struct QuoteValidator;

impl QuoteValidator {
    pub fn new() -> Self {
        Self
    }

    /// Whether every quote opened in `input` is closed
    ///
    /// A quote only opens a string at the start of a token, so `don't` is a plain
    /// word. Inside a quoted string a backslash escapes the next character,
    /// matching the scanner's escape rules closely enough to decide completeness.
    fn quotes_closed(input: &str) -> bool {
        let mut open: Option<char> = None;
        let mut escape_next = false;
        let mut at_token_start = true;

        for ch in input.chars() {
            match open {
                Some(quote) => {
                    if escape_next {
                        escape_next = false;
                    } else if ch == '\\' {
                        escape_next = true;
                    } else if ch == quote {
                        open = None;
                    }
                }
                None if at_token_start && is_quote(ch) => open = Some(ch),
                None => {}
            }
            at_token_start = open.is_none() && ch.is_whitespace();
        }

        open.is_none()
    }
}

impl Default for QuoteValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for QuoteValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        if Self::quotes_closed(line) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}
