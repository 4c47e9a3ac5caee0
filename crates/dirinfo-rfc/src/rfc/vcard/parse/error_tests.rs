//! Tests for content-line parse errors.

use super::error::{ParseError, ParseErrorKind};

#[test]
fn error_new() {
    let err = ParseError::new(ParseErrorKind::MalformedEscape, 5, "test message");
    assert_eq!(err.line, 5);
    assert_eq!(err.kind, ParseErrorKind::MalformedEscape);
    assert_eq!(err.message, "test message");
}

#[test]
fn error_missing_colon() {
    let err = ParseError::missing_colon(10, "GARBAGE LINE");
    assert_eq!(err.line, 10);
    assert_eq!(err.kind, ParseErrorKind::MissingColon);
    assert!(err.message.contains("GARBAGE LINE"));
}

#[test]
fn error_missing_colon_truncates_long_lines() {
    let err = ParseError::missing_colon(1, &"x".repeat(200));
    assert!(err.message.ends_with("..."));
    assert!(err.message.len() < 80);
}

#[test]
fn error_invalid_name() {
    let err = ParseError::invalid_name(3, "BAD NAME");
    assert_eq!(err.line, 3);
    assert_eq!(err.kind, ParseErrorKind::InvalidPropertyName);
    assert!(err.message.contains("BAD NAME"));
}

#[test]
fn error_invalid_parameter() {
    let err = ParseError::invalid_parameter(7, "empty parameter name");
    assert_eq!(err.line, 7);
    assert_eq!(err.kind, ParseErrorKind::InvalidParameter);
    assert_eq!(err.message, "empty parameter name");
}

#[test]
fn error_display() {
    let err = ParseError::new(ParseErrorKind::UnterminatedContinuation, 12, "stream ended");
    let displayed = format!("{err}");
    assert!(displayed.contains("line 12"));
    assert!(displayed.contains("unterminated continuation"));
    assert!(displayed.contains("stream ended"));
}

#[test]
fn error_kind_display() {
    assert_eq!(format!("{}", ParseErrorKind::MissingColon), "missing colon");
    assert_eq!(
        format!("{}", ParseErrorKind::MalformedEscape),
        "malformed escape"
    );
    assert_eq!(
        format!("{}", ParseErrorKind::InvalidPropertyName),
        "invalid property name"
    );
    assert_eq!(
        format!("{}", ParseErrorKind::InvalidParameter),
        "invalid parameter"
    );
    assert_eq!(format!("{}", ParseErrorKind::InvalidCharset), "invalid charset");
}

#[test]
fn error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    let err = ParseError::new(ParseErrorKind::MissingColon, 1, "x");
    assert_error(&err);
}
