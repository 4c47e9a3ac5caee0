//! Line unfolding and content-line splitting.
//!
//! A physical line that starts with a space or horizontal tab continues the
//! previous one (RFC 2425 §5.8.1). CRLF and bare LF terminators are both
//! accepted.

use std::io::{self, BufRead};

use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::{Params, Value, is_valid_name};

/// A logical line after unfolding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Unfolded text without the line terminator.
    pub text: String,
    /// Physical line number the logical line started on (1-based).
    pub line: usize,
    /// Whether any physical line had to be decoded lossily.
    pub invalid_utf8: bool,
}

#[derive(Debug)]
struct PhysicalLine {
    text: String,
    line: usize,
    invalid_utf8: bool,
}

/// Reassembles logical lines from a stream of physical lines.
///
/// Holds at most one physical line of lookahead, needed to decide whether
/// the current logical line is complete.
#[derive(Debug)]
pub struct LineUnfolder<R> {
    reader: R,
    peeked: Option<PhysicalLine>,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineUnfolder<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Returns the number of physical lines read so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Returns the next logical line, or `None` at end of stream.
    ///
    /// Blank physical lines are skipped. A continuation line with nothing
    /// before it starts a logical line of its own.
    ///
    /// ## Errors
    /// Propagates read errors from the underlying reader.
    pub fn next_logical(&mut self) -> io::Result<Option<LogicalLine>> {
        let first = loop {
            match self.next_physical()? {
                None => return Ok(None),
                Some(p) if p.text.is_empty() => {}
                Some(p) => break p,
            }
        };

        let mut logical = LogicalLine {
            text: strip_fold_prefix(&first.text).to_string(),
            line: first.line,
            invalid_utf8: first.invalid_utf8,
        };

        loop {
            match self.next_physical()? {
                Some(p) if p.text.starts_with([' ', '\t']) => {
                    logical.text.push_str(strip_fold_prefix(&p.text));
                    logical.invalid_utf8 |= p.invalid_utf8;
                }
                Some(p) => {
                    self.peeked = Some(p);
                    break;
                }
                None => break,
            }
        }

        Ok(Some(logical))
    }

    fn next_physical(&mut self) -> io::Result<Option<PhysicalLine>> {
        if let Some(p) = self.peeked.take() {
            return Ok(Some(p));
        }

        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        let (text, invalid_utf8) = match std::str::from_utf8(&self.buf) {
            Ok(s) => (s.to_string(), false),
            Err(_) => (String::from_utf8_lossy(&self.buf).into_owned(), true),
        };

        Ok(Some(PhysicalLine {
            text,
            line: self.line_number,
            invalid_utf8,
        }))
    }
}

/// Removes the single whitespace character that marks a continuation.
fn strip_fold_prefix(text: &str) -> &str {
    text.strip_prefix([' ', '\t']).unwrap_or(text)
}

/// A logical line split into its sections, before value interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name as written.
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Params,
    /// Raw value text, still escaped and possibly transfer-encoded.
    pub value: String,
}

/// Parses a single logical line into its components.
///
/// Format: `[group.]name[;param=value]*:value`
///
/// ## Errors
/// Returns an error if the colon separator is missing, the property name is
/// invalid, or a parameter has no name.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<RawContentLine> {
    let colon_pos =
        find_value_separator(line).ok_or_else(|| ParseError::missing_colon(line_num, line))?;

    let (head, value) = line.split_at(colon_pos);
    let value = &value[1..];

    let (token, params_str) = match head.split_once(';') {
        Some((token, rest)) => (token, Some(rest)),
        None => (head, None),
    };

    let (group, name) = parse_group(token);
    if !is_valid_name(name) {
        return Err(ParseError::invalid_name(line_num, name));
    }

    let params = match params_str {
        Some(s) => parse_parameters(s, line_num)?,
        None => Params::new(),
    };

    Ok(RawContentLine {
        group: group.map(String::from),
        name: name.to_string(),
        params,
        value: value.to_string(),
    })
}

/// Finds the colon that separates name/params from value.
///
/// Skips colons inside double-quoted parameter values and, outside quotes,
/// colons escaped with a backslash.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Splits the leading token at its last `.` into group and name.
fn parse_group(token: &str) -> (Option<&str>, &str) {
    match token.rsplit_once('.') {
        Some(("", name)) => (None, name),
        Some((group, name)) => (Some(group), name),
        None => (None, token),
    }
}

/// Parses the `;`-separated parameter section after the property name.
fn parse_parameters(s: &str, line_num: usize) -> ParseResult<Params> {
    let mut params = Params::new();
    let mut remaining = s;

    while !remaining.is_empty() {
        let name_end = remaining.find(['=', ';']).unwrap_or(remaining.len());
        let name = &remaining[..name_end];

        if remaining[name_end..].starts_with('=') {
            if name.is_empty() {
                return Err(ParseError::invalid_parameter(
                    line_num,
                    "parameter value without a name",
                ));
            }
            let (value, rest) = parse_param_values(&remaining[name_end + 1..]);
            params.insert(name, value);
            remaining = rest;
        } else {
            // Bare token: `;QUOTED-PRINTABLE` or legacy `;WORK`. Empty
            // segments from `;;` are ignored.
            if !name.is_empty() {
                params.insert(name.to_ascii_uppercase(), Value::new());
            }
            remaining = remaining.get(name_end + 1..).unwrap_or("");
        }
    }

    Ok(params)
}

/// Parses comma-separated, possibly quoted parameter values up to the next
/// unquoted `;`. Returns the values and the text after that `;`.
fn parse_param_values(s: &str) -> (Value, &str) {
    let mut values = Value::new();
    let mut current = String::new();
    let mut chars = s.char_indices();
    let mut in_quotes = false;

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            ';' if !in_quotes => {
                values.push(current);
                return (values, &s[i + 1..]);
            }
            // RFC 6868 caret encoding
            '^' => match chars.next() {
                Some((_, 'n' | 'N')) => current.push('\n'),
                Some((_, '\'')) => current.push('"'),
                Some((_, '^')) => current.push('^'),
                Some((_, other)) => {
                    current.push('^');
                    current.push(other);
                }
                None => current.push('^'),
            },
            _ => current.push(c),
        }
    }

    values.push(current);
    (values, "")
}
