//! Content-line scan error types.

use std::fmt;

/// Result type for content-line parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A problem found while scanning one logical line.
///
/// Every kind is recoverable: the scanner reports the error to its
/// diagnostic sink and carries on with the next logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Physical line number where the logical line started (1-based).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates a missing colon error.
    #[must_use]
    pub fn missing_colon(line: usize, text: &str) -> Self {
        Self::new(
            ParseErrorKind::MissingColon,
            line,
            format!("no name/value separator in {}", preview(text)),
        )
    }

    /// Creates an invalid property name error.
    #[must_use]
    pub fn invalid_name(line: usize, name: &str) -> Self {
        Self::new(
            ParseErrorKind::InvalidPropertyName,
            line,
            format!("invalid property name: {name:?}"),
        )
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidParameter, line, message)
    }
}

/// Shortens a logical line for inclusion in a message.
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    if text.chars().count() <= MAX_CHARS {
        format!("{text:?}")
    } else {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{head:?}...")
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Logical line has no `:` separating name from value; the line is skipped.
    MissingColon,
    /// Quoted-printable decoding failed; the raw text is kept.
    MalformedEscape,
    /// Stream ended while a soft line break still owed a continuation; the
    /// partial line is discarded.
    UnterminatedContinuation,
    /// Property name is empty or has invalid characters; the line is skipped.
    InvalidPropertyName,
    /// Parameter section is malformed; the line is skipped.
    InvalidParameter,
    /// Input or decoded octets were not UTF-8; replacement characters are used.
    InvalidCharset,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColon => write!(f, "missing colon"),
            Self::MalformedEscape => write!(f, "malformed escape"),
            Self::UnterminatedContinuation => write!(f, "unterminated continuation"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::InvalidCharset => write!(f, "invalid charset"),
        }
    }
}
