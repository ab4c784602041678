//! Typed argument decoders
//!
//! Every argument node carries an [`ArgumentType`] that knows how to decode one
//! value from a [`CursorScanner`]. Decoding either succeeds with an
//! [`ArgumentValue`] or fails with an [`ArgumentParseError`] and leaves the cursor
//! at the start of the token, so the caller can try a sibling node instead.

use std::fmt;

use super::scanner::{CursorScanner, is_quote};
use crate::error::{ArgumentParseError, ParseErrorKind};
use crate::suggestion::{Suggestions, SuggestionsBuilder};

/// How a string argument consumes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    /// A single bare token
    Word,
    /// A quoted string, or a bare token when unquoted
    QuotedOrWord,
    /// Everything up to the end of input, whitespace included
    Greedy,
}

/// Decoder for one typed argument
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgumentType {
    String(StringKind),
    Integer { min: Option<i32>, max: Option<i32> },
    Long { min: Option<i64>, max: Option<i64> },
    Float { min: Option<f32>, max: Option<f32> },
    Double { min: Option<f64>, max: Option<f64> },
    Boolean,
}

/// Decoded argument value stored in a command context
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    String(String),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
}

impl ArgumentType {
    /// A single bare word
    pub fn word() -> Self {
        ArgumentType::String(StringKind::Word)
    }

    /// A quoted string or a bare word
    pub fn string() -> Self {
        ArgumentType::String(StringKind::QuotedOrWord)
    }

    /// The rest of the input line
    pub fn greedy_string() -> Self {
        ArgumentType::String(StringKind::Greedy)
    }

    /// Unbounded 32-bit integer
    pub fn integer() -> Self {
        ArgumentType::Integer {
            min: None,
            max: None,
        }
    }

    /// 32-bit integer in `[min, max]`
    pub fn integer_between(min: i32, max: i32) -> Self {
        ArgumentType::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Unbounded 64-bit integer
    pub fn long() -> Self {
        ArgumentType::Long {
            min: None,
            max: None,
        }
    }

    /// 64-bit integer in `[min, max]`
    pub fn long_between(min: i64, max: i64) -> Self {
        ArgumentType::Long {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Unbounded single-precision float
    pub fn float() -> Self {
        ArgumentType::Float {
            min: None,
            max: None,
        }
    }

    /// Single-precision float in `[min, max]`
    pub fn float_between(min: f32, max: f32) -> Self {
        ArgumentType::Float {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Unbounded double-precision float
    pub fn double() -> Self {
        ArgumentType::Double {
            min: None,
            max: None,
        }
    }

    /// Double-precision float in `[min, max]`
    pub fn double_between(min: f64, max: f64) -> Self {
        ArgumentType::Double {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn boolean() -> Self {
        ArgumentType::Boolean
    }

    /// Whether this type swallows the rest of the line
    pub fn is_greedy(&self) -> bool {
        matches!(self, ArgumentType::String(StringKind::Greedy))
    }

    /// Decode one value from the scanner
    ///
    /// On failure the cursor is restored to where decoding started.
    pub fn parse(&self, scanner: &mut CursorScanner<'_>) -> Result<ArgumentValue, ArgumentParseError> {
        let start = scanner.cursor();
        let result = self.parse_at(scanner);
        if result.is_err() {
            scanner.set_cursor(start);
        }
        result
    }

    fn parse_at(&self, scanner: &mut CursorScanner<'_>) -> Result<ArgumentValue, ArgumentParseError> {
        let start = scanner.cursor();
        match *self {
            ArgumentType::String(StringKind::Word) => {
                Ok(ArgumentValue::String(scanner.read_unquoted_string().to_string()))
            }
            ArgumentType::String(StringKind::QuotedOrWord) => {
                scanner.read_string().map(ArgumentValue::String)
            }
            ArgumentType::String(StringKind::Greedy) => {
                Ok(ArgumentValue::String(scanner.read_remaining().to_string()))
            }
            ArgumentType::Integer { min, max } => {
                let token = scanner.read_unquoted_string();
                let value = parse_integer::<i32>(token, "integer", start)?;
                check_bounds(value, min, max, "Integer", start)?;
                Ok(ArgumentValue::Integer(value))
            }
            ArgumentType::Long { min, max } => {
                let token = scanner.read_unquoted_string();
                let value = parse_integer::<i64>(token, "long", start)?;
                check_bounds(value, min, max, "Long", start)?;
                Ok(ArgumentValue::Long(value))
            }
            ArgumentType::Float { min, max } => {
                let token = scanner.read_unquoted_string();
                let value = parse_decimal::<f32>(token, "float", start)?;
                check_bounds(value, min, max, "Float", start)?;
                Ok(ArgumentValue::Float(value))
            }
            ArgumentType::Double { min, max } => {
                let token = scanner.read_unquoted_string();
                let value = parse_decimal::<f64>(token, "double", start)?;
                check_bounds(value, min, max, "Double", start)?;
                Ok(ArgumentValue::Double(value))
            }
            ArgumentType::Boolean => {
                let token = scanner.read_unquoted_string();
                if token.eq_ignore_ascii_case("true") {
                    Ok(ArgumentValue::Bool(true))
                } else if token.eq_ignore_ascii_case("false") {
                    Ok(ArgumentValue::Bool(false))
                } else {
                    Err(ArgumentParseError::new(
                        ParseErrorKind::InvalidBoolean,
                        format!("Invalid boolean, expected 'true' or 'false' but found '{token}'"),
                        start,
                    ))
                }
            }
        }
    }

    /// Suggestions this type offers on its own, without a custom provider
    pub fn list_suggestions(&self, mut builder: SuggestionsBuilder) -> Suggestions {
        if let ArgumentType::Boolean = self {
            builder.suggest("true");
            builder.suggest("false");
        }
        builder.build()
    }

    /// A few inputs this type accepts
    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            ArgumentType::String(StringKind::Word) => &["word", "words_with_underscores"],
            ArgumentType::String(StringKind::QuotedOrWord) => &["\"quoted phrase\"", "word", "\"\""],
            ArgumentType::String(StringKind::Greedy) => &["word", "words with spaces", "\"and symbols\""],
            ArgumentType::Integer { .. } | ArgumentType::Long { .. } => &["0", "123", "-123"],
            ArgumentType::Float { .. } | ArgumentType::Double { .. } => &["0", "1.2", ".5", "-1"],
            ArgumentType::Boolean => &["true", "false"],
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentType::String(StringKind::Word) => write!(f, "word"),
            ArgumentType::String(StringKind::QuotedOrWord) => write!(f, "string"),
            ArgumentType::String(StringKind::Greedy) => write!(f, "text"),
            ArgumentType::Integer { min, max } => write_bounded(f, "integer", min, max),
            ArgumentType::Long { min, max } => write_bounded(f, "long", min, max),
            ArgumentType::Float { min, max } => write_bounded(f, "float", min, max),
            ArgumentType::Double { min, max } => write_bounded(f, "double", min, max),
            ArgumentType::Boolean => write!(f, "boolean"),
        }
    }
}

fn write_bounded<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    min: &Option<T>,
    max: &Option<T>,
) -> fmt::Result {
    match (min, max) {
        (Some(min), Some(max)) => write!(f, "{name}({min}..={max})"),
        (Some(min), None) => write!(f, "{name}({min}..)"),
        (None, Some(max)) => write!(f, "{name}(..={max})"),
        (None, None) => write!(f, "{name}"),
    }
}

/// `[+-]digits`
fn is_integer_token(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `[+-]` mantissa with at most one `.` and at least one digit, then an optional
/// `e[+-]digits` exponent
fn is_decimal_token(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };

    let mut dots = 0;
    let mut digits = 0;
    for b in mantissa.bytes() {
        match b {
            b'.' => dots += 1,
            b'0'..=b'9' => digits += 1,
            _ => return false,
        }
    }
    if dots > 1 || digits == 0 {
        return false;
    }

    match exponent {
        Some(exp) => is_integer_token(exp),
        None => true,
    }
}

fn not_a_number(token: &str, expected: &str, cursor: usize) -> ArgumentParseError {
    let message = if token.is_empty() {
        format!("Expected {expected}")
    } else {
        format!("Invalid {expected} '{token}'")
    };
    ArgumentParseError::new(ParseErrorKind::NotANumber, message, cursor)
}

fn parse_integer<T: std::str::FromStr>(
    token: &str,
    expected: &str,
    cursor: usize,
) -> Result<T, ArgumentParseError> {
    if !is_integer_token(token) {
        return Err(not_a_number(token, expected, cursor));
    }
    // Digits only at this point, so a failure means the value does not fit.
    token.parse::<T>().map_err(|_| {
        ArgumentParseError::new(
            ParseErrorKind::OutOfBounds,
            format!("Value '{token}' does not fit in a {expected}"),
            cursor,
        )
    })
}

fn parse_decimal<T: std::str::FromStr + Copy + Into<f64>>(
    token: &str,
    expected: &str,
    cursor: usize,
) -> Result<T, ArgumentParseError> {
    if !is_decimal_token(token) {
        return Err(not_a_number(token, expected, cursor));
    }
    let value = token
        .parse::<T>()
        .map_err(|_| not_a_number(token, expected, cursor))?;
    // Overflowing exponents parse to infinity rather than failing.
    let widened: f64 = value.into();
    if !widened.is_finite() {
        return Err(ArgumentParseError::new(
            ParseErrorKind::OutOfBounds,
            format!("Value '{token}' does not fit in a {expected}"),
            cursor,
        ));
    }
    Ok(value)
}

fn check_bounds<T: PartialOrd + fmt::Display + Copy>(
    value: T,
    min: Option<T>,
    max: Option<T>,
    label: &str,
    cursor: usize,
) -> Result<(), ArgumentParseError> {
    if let Some(min) = min {
        if value < min {
            return Err(ArgumentParseError::new(
                ParseErrorKind::OutOfBounds,
                format!("{label} must not be less than {min}, found {value}"),
                cursor,
            ));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(ArgumentParseError::new(
                ParseErrorKind::OutOfBounds,
                format!("{label} must not be more than {max}, found {value}"),
                cursor,
            ));
        }
    }
    Ok(())
}

/// Conversion out of a stored [`ArgumentValue`]
pub trait FromArgumentValue: Sized {
    /// Name used in lookup error messages
    const TYPE_NAME: &'static str;

    fn from_value(value: &ArgumentValue) -> Option<Self>;
}

impl FromArgumentValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromArgumentValue for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn from_value(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromArgumentValue for i64 {
    const TYPE_NAME: &'static str = "long";

    fn from_value(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::Long(v) => Some(*v),
            ArgumentValue::Integer(v) => Some(i64::from(*v)),
            _ => None,
        }
    }
}

impl FromArgumentValue for f32 {
    const TYPE_NAME: &'static str = "float";

    fn from_value(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromArgumentValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn from_value(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::Double(v) => Some(*v),
            ArgumentValue::Float(v) => Some(f64::from(*v)),
            _ => None,
        }
    }
}

impl FromArgumentValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_value(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::String(s) => {
                if s.chars().any(|c| c.is_whitespace() || is_quote(c)) {
                    write!(f, "{s:?}")
                } else {
                    write!(f, "{s}")
                }
            }
            ArgumentValue::Integer(v) => write!(f, "{v}"),
            ArgumentValue::Long(v) => write!(f, "{v}"),
            ArgumentValue::Float(v) => write!(f, "{v}"),
            ArgumentValue::Double(v) => write!(f, "{v}"),
            ArgumentValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(kind: ArgumentType, input: &str) -> Result<ArgumentValue, ArgumentParseError> {
        let mut scanner = CursorScanner::new(input);
        kind.parse(&mut scanner)
    }

    #[test]
    fn test_word_stops_at_whitespace() {
        let mut scanner = CursorScanner::new("steve diamond");
        let value = ArgumentType::word().parse(&mut scanner).unwrap();
        assert_eq!(value, ArgumentValue::String("steve".to_string()));
        assert_eq!(scanner.remaining(), " diamond");
    }

    #[test]
    fn test_quoted_or_word() {
        assert_eq!(
            parse(ArgumentType::string(), r#""hello \"world\"""#).unwrap(),
            ArgumentValue::String(r#"hello "world""#.to_string())
        );
        assert_eq!(
            parse(ArgumentType::string(), "bare rest").unwrap(),
            ArgumentValue::String("bare".to_string())
        );
    }

    #[test]
    fn test_greedy_takes_everything() {
        assert_eq!(
            parse(ArgumentType::greedy_string(), "hello  big world").unwrap(),
            ArgumentValue::String("hello  big world".to_string())
        );
        assert!(ArgumentType::greedy_string().is_greedy());
        assert!(!ArgumentType::word().is_greedy());
    }

    #[test]
    fn test_integer_bounds_inclusive() {
        let kind = ArgumentType::integer_between(1, 64);
        assert_eq!(parse(kind, "1").unwrap(), ArgumentValue::Integer(1));
        assert_eq!(parse(kind, "64").unwrap(), ArgumentValue::Integer(64));
        assert_eq!(parse(kind, "0").unwrap_err().kind, ParseErrorKind::OutOfBounds);
        assert_eq!(parse(kind, "65").unwrap_err().kind, ParseErrorKind::OutOfBounds);
    }

    #[test]
    fn test_long_bounds_inclusive() {
        let kind = ArgumentType::long_between(-5, 5);
        assert_eq!(parse(kind, "-5").unwrap(), ArgumentValue::Long(-5));
        assert_eq!(parse(kind, "5").unwrap(), ArgumentValue::Long(5));
        assert_eq!(parse(kind, "-6").unwrap_err().kind, ParseErrorKind::OutOfBounds);
        assert_eq!(parse(kind, "6").unwrap_err().kind, ParseErrorKind::OutOfBounds);
    }

    #[test]
    fn test_double_bounds_inclusive() {
        let kind = ArgumentType::double_between(0.0, 1.0);
        assert_eq!(parse(kind, "0").unwrap(), ArgumentValue::Double(0.0));
        assert_eq!(parse(kind, "1.0").unwrap(), ArgumentValue::Double(1.0));
        assert_eq!(parse(kind, "-1").unwrap_err().kind, ParseErrorKind::OutOfBounds);
        assert_eq!(parse(kind, "2").unwrap_err().kind, ParseErrorKind::OutOfBounds);
    }

    #[test]
    fn test_float_bounds_inclusive() {
        let kind = ArgumentType::float_between(-1.5, 1.5);
        assert_eq!(parse(kind, "-1.5").unwrap(), ArgumentValue::Float(-1.5));
        assert_eq!(parse(kind, "1.5").unwrap(), ArgumentValue::Float(1.5));
        assert_eq!(parse(kind, "-2.5").unwrap_err().kind, ParseErrorKind::OutOfBounds);
        assert_eq!(parse(kind, "2.5").unwrap_err().kind, ParseErrorKind::OutOfBounds);
    }

    #[test]
    fn test_integer_overflow_is_out_of_bounds() {
        let err = parse(ArgumentType::integer(), "99999999999").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OutOfBounds);
    }

    #[test]
    fn test_not_a_number_restores_cursor() {
        let mut scanner = CursorScanner::new("12abc next");
        let err = ArgumentType::integer().parse(&mut scanner).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NotANumber);
        assert_eq!(scanner.cursor(), 0);
    }

    #[test]
    fn test_decimal_grammar() {
        assert_eq!(parse(ArgumentType::double(), ".5").unwrap(), ArgumentValue::Double(0.5));
        assert_eq!(parse(ArgumentType::double(), "-2e3").unwrap(), ArgumentValue::Double(-2000.0));
        for bad in ["inf", "NaN", "1.2.3", ".", "-", "1e", "0x10", "1,5"] {
            assert_eq!(
                parse(ArgumentType::double(), bad).unwrap_err().kind,
                ParseErrorKind::NotANumber,
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_decimal_overflow_is_out_of_bounds() {
        let err = parse(ArgumentType::float(), "1e39").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::OutOfBounds);
        assert_eq!(err.cursor, 0);
        assert_eq!(
            parse(ArgumentType::double(), "1e400").unwrap_err().kind,
            ParseErrorKind::OutOfBounds
        );
        assert_eq!(
            parse(ArgumentType::double(), "-1e400").unwrap_err().kind,
            ParseErrorKind::OutOfBounds
        );
        // Still representable as a double
        assert_eq!(parse(ArgumentType::double(), "1e39").unwrap(), ArgumentValue::Double(1e39));
    }

    #[test]
    fn test_host_decode_error_converts() {
        use crate::error::{CmdTreeError, DispatchError};

        fn decode(input: &str) -> crate::error::Result<i32> {
            let value = ArgumentType::integer().parse(&mut CursorScanner::new(input))?;
            Ok(i32::from_value(&value).unwrap_or_default())
        }

        assert_eq!(decode("12").unwrap(), 12);
        match decode("twelve") {
            Err(CmdTreeError::Dispatch(DispatchError::Argument(e))) => {
                assert_eq!(e.kind, ParseErrorKind::NotANumber)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_integer_rejects_decimal() {
        assert_eq!(
            parse(ArgumentType::integer(), "1.5").unwrap_err().kind,
            ParseErrorKind::NotANumber
        );
        assert_eq!(parse(ArgumentType::integer(), "+7").unwrap(), ArgumentValue::Integer(7));
    }

    #[test]
    fn test_boolean_case_insensitive() {
        assert_eq!(parse(ArgumentType::boolean(), "TRUE").unwrap(), ArgumentValue::Bool(true));
        assert_eq!(parse(ArgumentType::boolean(), "False").unwrap(), ArgumentValue::Bool(false));
        assert_eq!(
            parse(ArgumentType::boolean(), "yes").unwrap_err().kind,
            ParseErrorKind::InvalidBoolean
        );
    }

    #[test]
    fn test_quote_errors_surface() {
        assert_eq!(
            parse(ArgumentType::string(), "\"open").unwrap_err().kind,
            ParseErrorKind::UnterminatedQuote
        );
        assert_eq!(
            parse(ArgumentType::string(), r#""a\qb""#).unwrap_err().kind,
            ParseErrorKind::InvalidEscape
        );
    }

    #[test]
    fn test_boolean_intrinsic_suggestions() {
        let builder = SuggestionsBuilder::new("toggle pvp t", 11);
        let suggestions = ArgumentType::boolean().list_suggestions(builder);
        let texts: Vec<&str> = suggestions.list().iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["true"]);
    }

    #[test]
    fn test_integer_has_no_intrinsic_suggestions() {
        let builder = SuggestionsBuilder::new("give steve dirt ", 16);
        assert!(ArgumentType::integer().list_suggestions(builder).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(ArgumentType::integer_between(1, 64).to_string(), "integer(1..=64)");
        assert_eq!(ArgumentType::greedy_string().to_string(), "text");
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(i64::from_value(&ArgumentValue::Integer(3)), Some(3));
        assert_eq!(String::from_value(&ArgumentValue::Bool(true)), None);
        assert_eq!(ArgumentValue::String("two words".into()).to_string(), "\"two words\"");
    }
}
