//! Reporting channel for recoverable scan errors.
//!
//! The scanner never aborts a stream because one logical line is malformed.
//! It hands the error to a [`DiagnosticSink`] and moves on, so callers decide
//! whether problems are logged, collected, or counted.

use super::parse::ParseError;

/// Receives errors the scanner recovered from.
pub trait DiagnosticSink {
    fn report(&mut self, error: ParseError);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, error: ParseError) {
        (**self).report(error);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&mut self, error: ParseError) {
        (**self).report(error);
    }
}

/// Emits each error as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, error: ParseError) {
        tracing::warn!(
            line = error.line,
            kind = %error.kind,
            message = %error.message,
            "Recovered from malformed content line"
        );
    }
}

/// Keeps every reported error.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    errors: Vec<ParseError>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::parse::ParseErrorKind;

    fn report_through<S: DiagnosticSink>(mut sink: S) {
        sink.report(ParseError::new(ParseErrorKind::MissingColon, 2, "x"));
    }

    #[test]
    fn collecting_sink_keeps_errors() {
        let mut sink = CollectingSink::new();
        report_through(&mut sink);
        report_through(&mut sink);

        assert_eq!(sink.errors().len(), 2);
        assert_eq!(sink.errors()[0].line, 2);
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut boxed: Box<dyn DiagnosticSink> = Box::new(CollectingSink::new());
        boxed.report(ParseError::new(ParseErrorKind::InvalidCharset, 1, "y"));
    }

    #[test_log::test]
    fn tracing_sink_accepts_errors() {
        let mut sink = TracingSink;
        sink.report(ParseError::new(ParseErrorKind::MalformedEscape, 4, "bad =ZZ"));
    }
}
