//! Stateful content-line scanner.

use std::io::BufRead;

use dirinfo_core::config::ReaderConfig;

use super::error::{ParseError, ParseErrorKind};
use super::lexer::{LineUnfolder, parse_content_line};
use super::values::split_structured;
use crate::error::RfcResult;
use crate::rfc::vcard::codec::quoted_printable;
use crate::rfc::vcard::core::ContentLine;
use crate::rfc::vcard::diagnostics::{DiagnosticSink, TracingSink};

/// Scanner behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Decode values declared `ENCODING=QUOTED-PRINTABLE`.
    pub decode_quoted_printable: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            decode_quoted_printable: true,
        }
    }
}

impl From<&ReaderConfig> for ScanOptions {
    fn from(config: &ReaderConfig) -> Self {
        Self {
            decode_quoted_printable: config.decode_quoted_printable,
        }
    }
}

/// Turns a physical-line stream into [`ContentLine`]s.
///
/// Every logical line is yielded, `BEGIN`/`END` included; the scanner has
/// no notion of records or property semantics. Malformed lines are reported
/// to the diagnostic sink and skipped.
///
/// Values declared quoted-printable are decoded before they are split. The
/// writer does not mirror this: it never encodes.
#[derive(Debug)]
pub struct ContentLineScanner<R, S = TracingSink> {
    lines: LineUnfolder<R>,
    sink: S,
    options: ScanOptions,
}

impl<R: BufRead> ContentLineScanner<R> {
    /// Creates a scanner that logs recovered errors through `tracing`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_sink(reader, TracingSink)
    }
}

impl<R: BufRead, S: DiagnosticSink> ContentLineScanner<R, S> {
    #[must_use]
    pub fn with_sink(reader: R, sink: S) -> Self {
        Self {
            lines: LineUnfolder::new(reader),
            sink,
            options: ScanOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Reads the next well-formed content line.
    ///
    /// Returns `Ok(None)` at end of stream, including when the stream ends
    /// while a quoted-printable soft line break still awaits its
    /// continuation (the partial line is reported and dropped).
    ///
    /// ## Errors
    /// Returns `RfcError::Io` if the underlying reader fails.
    pub fn read_line(&mut self) -> RfcResult<Option<ContentLine>> {
        loop {
            let Some(logical) = self.lines.next_logical()? else {
                return Ok(None);
            };

            if logical.invalid_utf8 {
                self.report_invalid_utf8(logical.line);
            }

            let raw = match parse_content_line(&logical.text, logical.line) {
                Ok(raw) => raw,
                Err(e) => {
                    self.sink.report(e);
                    continue;
                }
            };

            let mut text = raw.value;
            if raw.params.is_quoted_printable() {
                if !self.pull_soft_breaks(&mut text)? {
                    self.sink.report(ParseError::new(
                        ParseErrorKind::UnterminatedContinuation,
                        logical.line,
                        format!("stream ended inside quoted-printable {} value", raw.name),
                    ));
                    return Ok(None);
                }
                if self.options.decode_quoted_printable {
                    text = self.decode_quoted_printable(text, logical.line);
                }
            }

            tracing::trace!(line = logical.line, name = %raw.name, "Scanned content line");

            return Ok(Some(ContentLine::from_parts(
                raw.group,
                raw.name,
                raw.params,
                split_structured(&text),
            )));
        }
    }

    /// Appends following lines while the quoted-printable text ends in a
    /// soft line break, transport padding allowed. Returns `false` if the
    /// stream ends first.
    fn pull_soft_breaks(&mut self, text: &mut String) -> RfcResult<bool> {
        while text.trim_end_matches([' ', '\t']).ends_with('=') {
            let Some(next) = self.lines.next_logical()? else {
                return Ok(false);
            };
            if next.invalid_utf8 {
                self.report_invalid_utf8(next.line);
            }
            text.push('\n');
            text.push_str(&next.text);
        }
        Ok(true)
    }

    fn report_invalid_utf8(&mut self, line: usize) {
        self.sink.report(ParseError::new(
            ParseErrorKind::InvalidCharset,
            line,
            "input is not valid UTF-8; replacement characters substituted",
        ));
    }

    /// Decodes quoted-printable text, falling back to the raw text when the
    /// escapes are malformed.
    fn decode_quoted_printable(&mut self, text: String, line: usize) -> String {
        match quoted_printable::decode(&text) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(decoded) => decoded,
                Err(e) => {
                    self.sink.report(ParseError::new(
                        ParseErrorKind::InvalidCharset,
                        line,
                        "decoded quoted-printable value is not valid UTF-8",
                    ));
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            },
            Err(e) => {
                self.sink.report(ParseError::new(
                    ParseErrorKind::MalformedEscape,
                    line,
                    format!("{e}; keeping undecoded text"),
                ));
                text
            }
        }
    }
}

impl<R: BufRead, S: DiagnosticSink> Iterator for ContentLineScanner<R, S> {
    type Item = RfcResult<ContentLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::Value;
    use crate::rfc::vcard::diagnostics::CollectingSink;

    fn scan(input: &str) -> (Vec<ContentLine>, Vec<ParseError>) {
        let mut scanner = ContentLineScanner::with_sink(input.as_bytes(), CollectingSink::new());
        let mut lines = Vec::new();
        while let Some(line) = scanner.read_line().unwrap() {
            lines.push(line);
        }
        (lines, scanner.into_sink().into_errors())
    }

    #[test]
    fn yields_every_line() {
        let (lines, errors) = scan("BEGIN:VCARD\r\nFN:John Doe\r\nEND:VCARD\r\n");
        assert!(errors.is_empty());
        let names: Vec<&str> = lines.iter().map(ContentLine::name).collect();
        assert_eq!(names, vec!["BEGIN", "FN", "END"]);
        assert_eq!(lines[1].text(), "John Doe");
    }

    #[test]
    fn skips_line_without_colon() {
        let (lines, errors) = scan("FN:A\r\nGARBAGE\r\nNOTE:B\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text(), "B");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ParseErrorKind::MissingColon);
        assert_eq!(errors[0].line, 2);
    }

    #[test]
    fn decodes_quoted_printable() {
        let (lines, errors) = scan("NOTE;ENCODING=QUOTED-PRINTABLE:caf=C3=A9\r\n");
        assert!(errors.is_empty());
        assert_eq!(lines[0].text(), "café");
        assert!(lines[0].params().is_quoted_printable());
    }

    #[test]
    fn decodes_bare_quoted_printable_token() {
        let (lines, _) = scan("FN;CHARSET=UTF-8;QUOTED-PRINTABLE:=D0=B3=D0=BE\r\n");
        assert_eq!(lines[0].text(), "го");
    }

    #[test]
    fn decoded_delimiters_split() {
        let (lines, _) = scan("N;ENCODING=QUOTED-PRINTABLE:M=C3=BCller;Hans\r\n");
        assert_eq!(lines[0].value().len(), 2);
        assert_eq!(lines[0].value().component(0), Some(&Value::single("Müller")));
    }

    #[test]
    fn soft_break_spans_physical_lines() {
        let input = "NOTE;ENCODING=QUOTED-PRINTABLE:first=\r\nsecond=\r\nthird\r\nFN:x\r\n";
        let (lines, errors) = scan(input);
        assert!(errors.is_empty());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "firstsecondthird");
        assert_eq!(lines[1].name(), "FN");
    }

    #[test]
    fn escapes_survive_whitespace_folding() {
        let input = "NOTE;ENCODING=QUOTED-PRINTABLE:caf=C3\r\n =A9\r\n";
        let (lines, errors) = scan(input);
        assert!(errors.is_empty());
        assert_eq!(lines[0].text(), "café");
    }

    #[test]
    fn malformed_escape_keeps_raw_text() {
        let (lines, errors) = scan("NOTE;ENCODING=QUOTED-PRINTABLE:50=ZZ off\r\nFN:x\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "50=ZZ off");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ParseErrorKind::MalformedEscape);
    }

    #[test]
    fn unterminated_continuation_ends_stream() {
        let (lines, errors) = scan("FN:x\r\nNOTE;ENCODING=QUOTED-PRINTABLE:dangling=\r\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ParseErrorKind::UnterminatedContinuation);
        assert_eq!(errors[0].line, 2);
    }

    #[test]
    fn decoding_can_be_disabled() {
        let mut scanner = ContentLineScanner::with_sink(
            "NOTE;ENCODING=QUOTED-PRINTABLE:caf=C3=A9\r\n".as_bytes(),
            CollectingSink::new(),
        )
        .with_options(ScanOptions {
            decode_quoted_printable: false,
        });
        let line = scanner.read_line().unwrap().unwrap();
        assert_eq!(line.text(), "caf=C3=A9");
    }

    #[test]
    fn invalid_decoded_utf8_is_reported() {
        let (lines, errors) = scan("NOTE;ENCODING=QUOTED-PRINTABLE:caf=E9\r\n");
        assert_eq!(lines[0].text(), "caf\u{FFFD}");
        assert_eq!(errors[0].kind, ParseErrorKind::InvalidCharset);
    }

    #[test]
    fn invalid_input_utf8_is_reported() {
        let mut scanner =
            ContentLineScanner::with_sink(&b"FN:caf\xe9\r\n"[..], CollectingSink::new());
        let line = scanner.read_line().unwrap().unwrap();
        assert_eq!(line.text(), "caf\u{FFFD}");
        assert_eq!(scanner.sink().errors()[0].kind, ParseErrorKind::InvalidCharset);
    }

    #[test]
    fn invalid_utf8_on_continuation_is_reported() {
        let mut scanner = ContentLineScanner::with_sink(
            &b"NOTE;ENCODING=QUOTED-PRINTABLE:a=\r\nb\xff\r\n"[..],
            CollectingSink::new(),
        );
        let line = scanner.read_line().unwrap().unwrap();
        assert_eq!(line.text(), "ab\u{FFFD}");

        let errors = scanner.sink().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ParseErrorKind::InvalidCharset);
        assert_eq!(errors[0].line, 2);
    }

    #[test]
    fn padded_soft_break_continues() {
        let (lines, errors) =
            scan("NOTE;ENCODING=QUOTED-PRINTABLE:abc= \r\ndef=\t\r\nghi\r\nFN:x\r\n");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "abcdefghi");
        assert_eq!(lines[1].text(), "x");
    }

    #[test]
    fn unknown_properties_are_yielded() {
        let (lines, _) = scan("X-ABLabel:_$!<Other>!$_\r\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name(), "X-ABLabel");
    }

    #[test]
    fn iterator_collects() {
        let scanner = ContentLineScanner::new("A:1\r\nB:2\r\n".as_bytes());
        let lines: Vec<ContentLine> = scanner.collect::<RfcResult<_>>().unwrap();
        assert_eq!(lines.len(), 2);
    }
}
