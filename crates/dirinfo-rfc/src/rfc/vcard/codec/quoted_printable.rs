//! Quoted-printable transfer encoding (RFC 2045 §6.7).
//!
//! Decoding is applied by the scanner to values declared
//! `ENCODING=QUOTED-PRINTABLE`. The writer never encodes on its own; callers
//! that want quoted-printable output run [`encode`] and set the parameter
//! themselves.

use thiserror::Error;

/// An `=` that is neither followed by two hex digits nor a soft line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed quoted-printable escape at offset {offset}")]
pub struct QuotedPrintableError {
    /// Byte offset of the offending `=` in the input.
    pub offset: usize,
}

/// Decodes quoted-printable text into raw octets.
///
/// `=XX` becomes the octet `0xXX` (either hex case is accepted). An `=`
/// followed by optional spaces or tabs and then a line break or the end of
/// the input is a soft line break and produces nothing. All other bytes are
/// copied through.
///
/// ## Errors
/// Returns [`QuotedPrintableError`] at the first malformed escape.
pub fn decode(text: &str) -> Result<Vec<u8>, QuotedPrintableError> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    while let Some(&b) = bytes.get(pos) {
        if b != b'=' {
            out.push(b);
            pos += 1;
            continue;
        }

        let rest = &bytes[pos + 1..];
        let mut octet = [0u8; 1];
        if rest.len() >= 2 && hex::decode_to_slice(&rest[..2], &mut octet).is_ok() {
            out.push(octet[0]);
            pos += 3;
        } else if let Some(len) = soft_break_len(rest) {
            pos += 1 + len;
        } else {
            return Err(QuotedPrintableError { offset: pos });
        }
    }

    Ok(out)
}

/// Returns the length of a soft line break following an `=`: transport
/// padding, then CRLF, LF, or the end of input.
fn soft_break_len(rest: &[u8]) -> Option<usize> {
    let padding = rest
        .iter()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count();
    match &rest[padding..] {
        [] => Some(padding),
        [b'\r', b'\n', ..] => Some(padding + 2),
        [b'\n', ..] => Some(padding + 1),
        _ => None,
    }
}

/// Encodes octets as quoted-printable text.
///
/// Printable ASCII other than `=` is kept, as are spaces and tabs except at
/// the very end. Everything else, including CR and LF, becomes `=XX`. No
/// soft line breaks are inserted; the writer's folding handles line length.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    for (i, &b) in bytes.iter().enumerate() {
        let last = i + 1 == bytes.len();
        match b {
            b'=' => push_escape(&mut out, b),
            b' ' | b'\t' if last => push_escape(&mut out, b),
            b' ' | b'\t' | b'!'..=b'~' => out.push(char::from(b)),
            _ => push_escape(&mut out, b),
        }
    }

    out
}

fn push_escape(out: &mut String, b: u8) {
    out.push('=');
    out.push_str(&hex::encode_upper([b]));
}
