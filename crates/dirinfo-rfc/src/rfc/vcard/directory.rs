//! Reader and writer facade over the content-line scanner and writer.

use std::io::{BufRead, Write};

use super::build::{ContentLineWriter, WriteOptions, render_line};
use super::core::ContentLine;
use super::diagnostics::{DiagnosticSink, TracingSink};
use super::parse::{ContentLineScanner, ScanOptions};
use crate::error::RfcResult;

/// Record kind closed by `END:VCARD`.
const RECORD_KIND: &str = "VCARD";

/// Reads content lines from a directory-information stream.
#[derive(Debug)]
pub struct DirectoryInfoReader<R, S = TracingSink> {
    scanner: ContentLineScanner<R, S>,
}

impl<R: BufRead> DirectoryInfoReader<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            scanner: ContentLineScanner::new(reader),
        }
    }
}

impl<R: BufRead, S: DiagnosticSink> DirectoryInfoReader<R, S> {
    #[must_use]
    pub fn with_sink(reader: R, sink: S) -> Self {
        Self {
            scanner: ContentLineScanner::with_sink(reader, sink),
        }
    }

    #[must_use]
    pub fn with_options(self, options: ScanOptions) -> Self {
        Self {
            scanner: self.scanner.with_options(options),
        }
    }

    /// Returns the next content line, or `None` at end of stream.
    ///
    /// ## Errors
    /// Returns `RfcError::Io` if the underlying reader fails. Malformed lines
    /// are reported to the sink and skipped.
    pub fn read_content_line(&mut self) -> RfcResult<Option<ContentLine>> {
        self.scanner.read_line()
    }

    /// ## Summary
    /// Reads lines up to and including the next `END:VCARD`.
    ///
    /// Nesting is not tracked; the first `END:VCARD` closes the record. A
    /// stream that ends mid-record yields what was read so far. Returns
    /// `None` once the stream is exhausted.
    ///
    /// ## Errors
    /// Returns `RfcError::Io` if the underlying reader fails.
    pub fn read_record(&mut self) -> RfcResult<Option<Vec<ContentLine>>> {
        let mut record = Vec::new();

        while let Some(line) = self.scanner.read_line()? {
            let closes = line.is_end(RECORD_KIND);
            record.push(line);
            if closes {
                return Ok(Some(record));
            }
        }

        if record.is_empty() {
            return Ok(None);
        }

        tracing::debug!(lines = record.len(), "Stream ended before END:VCARD");
        Ok(Some(record))
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        self.scanner.sink()
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.scanner.into_sink()
    }
}

impl<R: BufRead, S: DiagnosticSink> Iterator for DirectoryInfoReader<R, S> {
    type Item = RfcResult<ContentLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_content_line().transpose()
    }
}

/// Writes content lines to a directory-information stream.
#[derive(Debug)]
pub struct DirectoryInfoWriter<W> {
    writer: ContentLineWriter<W>,
}

impl<W: Write> DirectoryInfoWriter<W> {
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self {
            writer: ContentLineWriter::new(inner),
        }
    }

    #[must_use]
    pub fn with_options(inner: W, options: WriteOptions) -> Self {
        Self {
            writer: ContentLineWriter::with_options(inner, options),
        }
    }

    /// ## Errors
    /// Returns `RfcError::Io` if the sink rejects the bytes.
    pub fn write_content_line(&mut self, line: &ContentLine) -> RfcResult<()> {
        self.writer.write_line(line)
    }

    /// Writes every line in order.
    ///
    /// ## Errors
    /// Stops at and returns the first I/O failure.
    pub fn write_all<'a, I>(&mut self, lines: I) -> RfcResult<()>
    where
        I: IntoIterator<Item = &'a ContentLine>,
    {
        for line in lines {
            self.writer.write_line(line)?;
        }
        Ok(())
    }

    /// ## Errors
    /// Returns `RfcError::Io` if flushing the sink fails.
    pub fn flush(&mut self) -> RfcResult<()> {
        self.writer.flush()
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Parses every well-formed content line in `input`.
///
/// Malformed lines are logged and skipped.
///
/// ## Errors
/// Reading from a string cannot fail, but the signature matches the
/// streaming reader.
pub fn parse_str(input: &str) -> RfcResult<Vec<ContentLine>> {
    DirectoryInfoReader::new(input.as_bytes()).collect()
}

/// Renders lines with the default width and CRLF terminators.
#[must_use]
pub fn render(lines: &[ContentLine]) -> String {
    let options = WriteOptions::default();
    lines.iter().map(|line| render_line(line, options)).collect()
}
