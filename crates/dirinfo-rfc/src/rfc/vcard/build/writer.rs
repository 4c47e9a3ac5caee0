//! Content-line rendering and the streaming writer.

use std::io::Write;

use dirinfo_core::config::WriterConfig;
use dirinfo_core::constants::{DEFAULT_MAX_LINE_OCTETS, MIN_MAX_LINE_OCTETS};
use dirinfo_core::error::CoreError;
use dirinfo_core::types::LineEnding;

use super::escape::{escape_param_value, join_structured};
use super::fold::fold_line;
use crate::error::RfcResult;
use crate::rfc::vcard::core::{ContentLine, Value};

/// Output formatting for [`ContentLineWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    max_line_octets: usize,
    line_ending: LineEnding,
}

impl WriteOptions {
    /// ## Errors
    /// Returns `CoreError::ConfigError` if `max_line_octets` is too small to
    /// hold a fold unit after the continuation space.
    pub fn new(max_line_octets: usize, line_ending: LineEnding) -> RfcResult<Self> {
        if max_line_octets < MIN_MAX_LINE_OCTETS {
            return Err(CoreError::ConfigError(format!(
                "max_line_octets must be at least {MIN_MAX_LINE_OCTETS}, got {max_line_octets}"
            ))
            .into());
        }
        Ok(Self {
            max_line_octets,
            line_ending,
        })
    }

    #[must_use]
    pub const fn max_line_octets(&self) -> usize {
        self.max_line_octets
    }

    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            max_line_octets: DEFAULT_MAX_LINE_OCTETS,
            line_ending: LineEnding::Crlf,
        }
    }
}

impl TryFrom<&WriterConfig> for WriteOptions {
    type Error = crate::error::RfcError;

    fn try_from(config: &WriterConfig) -> RfcResult<Self> {
        Self::new(config.max_line_octets, config.line_ending)
    }
}

/// Renders a content line as one logical line with no folding and no
/// terminator.
///
/// Values are escaped but never quoted-printable encoded, even when the
/// parameters declare `ENCODING=QUOTED-PRINTABLE`.
#[must_use]
pub fn render_unfolded(line: &ContentLine) -> String {
    let mut out = String::new();

    if let Some(group) = line.group() {
        out.push_str(group);
        out.push('.');
    }
    out.push_str(line.name());

    for (name, values) in line.params().iter() {
        serialize_parameter(&mut out, name, values);
    }

    out.push(':');
    out.push_str(&join_structured(line.value()));
    out
}

/// Renders and folds a content line, terminator included.
#[must_use]
pub fn render_line(line: &ContentLine, options: WriteOptions) -> String {
    let mut out = fold_line(
        &render_unfolded(line),
        options.max_line_octets,
        options.line_ending,
    );
    out.push_str(options.line_ending.as_str());
    out
}

/// Appends `;NAME=VALUE[,VALUE]*`, or a bare `;NAME` when there are no
/// values.
fn serialize_parameter(out: &mut String, name: &str, values: &Value) {
    out.push(';');
    out.push_str(name);

    if values.is_empty() {
        return;
    }

    out.push('=');
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let (escaped, needs_quotes) = escape_param_value(value);
        if needs_quotes {
            out.push('"');
            out.push_str(&escaped);
            out.push('"');
        } else {
            out.push_str(&escaped);
        }
    }
}

/// Writes content lines to a byte sink.
#[derive(Debug)]
pub struct ContentLineWriter<W> {
    inner: W,
    options: WriteOptions,
}

impl<W: Write> ContentLineWriter<W> {
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, WriteOptions::default())
    }

    #[must_use]
    pub fn with_options(inner: W, options: WriteOptions) -> Self {
        Self { inner, options }
    }

    #[must_use]
    pub fn options(&self) -> WriteOptions {
        self.options
    }

    /// ## Summary
    /// Serializes, folds and writes one content line with its terminator.
    ///
    /// ## Errors
    /// Returns `RfcError::Io` if the sink rejects the bytes.
    pub fn write_line(&mut self, line: &ContentLine) -> RfcResult<()> {
        let rendered = render_line(line, self.options);
        tracing::trace!(name = line.name(), octets = rendered.len(), "Writing content line");
        self.inner.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// ## Errors
    /// Returns `RfcError::Io` if flushing the sink fails.
    pub fn flush(&mut self) -> RfcResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RfcError;
    use crate::rfc::vcard::core::StructuredValue;

    fn write_one(line: &ContentLine) -> String {
        let mut writer = ContentLineWriter::new(Vec::new());
        writer.write_line(line).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn simple_line() {
        let line = ContentLine::new("FN", "John Doe").unwrap();
        assert_eq!(write_one(&line), "FN:John Doe\r\n");
    }

    #[test]
    fn group_and_params() {
        let line = ContentLine::new("TEL", "+1-555-555-5555")
            .unwrap()
            .with_group("item1")
            .unwrap()
            .with_param("TYPE", Value::from_iter(["WORK", "VOICE"]))
            .unwrap();
        assert_eq!(
            render_unfolded(&line),
            "item1.TEL;TYPE=WORK,VOICE:+1-555-555-5555"
        );
    }

    #[test]
    fn structured_value_escaped() {
        let value = StructuredValue::new(vec![
            Value::single("Doe"),
            Value::single("John"),
            Value::single("a;b"),
        ]);
        let line = ContentLine::new("N", value).unwrap();
        assert_eq!(render_unfolded(&line), "N:Doe;John;a\\;b");
    }

    #[test]
    fn bare_parameter() {
        let line = ContentLine::new("TEL", "555")
            .unwrap()
            .with_param("PREF", Value::new())
            .unwrap();
        assert_eq!(render_unfolded(&line), "TEL;PREF:555");
    }

    #[test]
    fn quoted_parameter_value() {
        let line = ContentLine::new("X-TEST", "v")
            .unwrap()
            .with_param("LABEL", Value::from_iter(["a:b", "plain"]))
            .unwrap();
        assert_eq!(render_unfolded(&line), "X-TEST;LABEL=\"a:b\",plain:v");
    }

    #[test]
    fn quoted_printable_is_not_encoded() {
        let line = ContentLine::new("NOTE", "café")
            .unwrap()
            .with_param("ENCODING", "QUOTED-PRINTABLE")
            .unwrap();
        assert_eq!(
            render_unfolded(&line),
            "NOTE;ENCODING=QUOTED-PRINTABLE:café"
        );
    }

    #[test]
    fn long_line_folded() {
        let line = ContentLine::new("NOTE", "x".repeat(100)).unwrap();
        let out = write_one(&line);
        assert!(out.contains("\r\n "));
        assert!(out.ends_with("\r\n"));
        for part in out.trim_end_matches("\r\n").split("\r\n") {
            assert!(part.len() <= DEFAULT_MAX_LINE_OCTETS);
        }
    }

    #[test]
    fn lf_terminator() {
        let options = WriteOptions::new(75, LineEnding::Lf).unwrap();
        let line = ContentLine::new("FN", "x").unwrap();
        assert_eq!(render_line(&line, options), "FN:x\n");
    }

    #[test]
    fn rejects_tiny_width() {
        let err = WriteOptions::new(3, LineEnding::Crlf).unwrap_err();
        assert!(matches!(err, RfcError::CoreError(CoreError::ConfigError(_))));
    }

    #[test]
    fn options_from_config() {
        let config = WriterConfig {
            max_line_octets: 40,
            line_ending: LineEnding::Lf,
        };
        let options = WriteOptions::try_from(&config).unwrap();
        assert_eq!(options.max_line_octets(), 40);
        assert_eq!(options.line_ending(), LineEnding::Lf);
    }
}
