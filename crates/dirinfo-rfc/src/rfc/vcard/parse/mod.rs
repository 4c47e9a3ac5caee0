//! Content-line parsing.
//!
//! ## Usage
//!
//! ```rust
//! use dirinfo_rfc::rfc::vcard::parse::ContentLineScanner;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! FN:John Doe\r\n\
//! END:VCARD\r\n";
//!
//! let mut scanner = ContentLineScanner::new(input.as_bytes());
//! let begin = scanner.read_line().unwrap().unwrap();
//! assert!(begin.is_begin("VCARD"));
//! let name = scanner.read_line().unwrap().unwrap();
//! assert_eq!(name.text(), "John Doe");
//! ```
//!
//! ## Features
//!
//! - Handles line folding/unfolding (CRLF or bare LF)
//! - Parses property groups (item1.TEL)
//! - Splits structured values on `;` and `,` with backslash escapes
//! - Decodes quoted-printable values, including soft line breaks that span
//!   physical lines
//! - RFC 6868 caret encoding for parameters
//! - Recovers from malformed lines through a diagnostic sink

mod error;
mod lexer;
mod scanner;
mod values;

#[cfg(test)]
mod error_tests;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{LineUnfolder, LogicalLine, RawContentLine, parse_content_line};
pub use scanner::{ContentLineScanner, ScanOptions};
pub use values::split_structured;
