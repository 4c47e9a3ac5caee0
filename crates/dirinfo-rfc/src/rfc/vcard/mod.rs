//! vCard content-line engine (RFC 2425 / RFC 2426, vCard 2.1 compatible).
//!
//! Works at the level of logical content lines: `[group.]NAME;PARAMS:VALUE`.
//! Record structure beyond `BEGIN`/`END` and per-property semantics are left
//! to callers.
//!
//! ## Usage
//!
//! ```rust
//! use dirinfo_rfc::rfc::vcard::{parse_str, render};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:2.1\r\n\
//! N;ENCODING=QUOTED-PRINTABLE:M=C3=BCller;Hans\r\n\
//! END:VCARD\r\n";
//!
//! let lines = parse_str(input).unwrap();
//! assert_eq!(lines[2].value().component(0).and_then(|v| v.first()), Some("Müller"));
//!
//! // The writer never re-encodes quoted-printable.
//! assert!(render(&lines).contains("N;ENCODING=QUOTED-PRINTABLE:Müller;Hans\r\n"));
//! ```

pub mod build;
pub mod codec;
pub mod core;
pub mod diagnostics;
pub mod directory;
pub mod parse;

#[cfg(test)]
mod tests;

pub use build::{ContentLineWriter, WriteOptions};
pub use core::{ContentLine, Params, PropertyName, StructuredValue, Value};
pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use directory::{DirectoryInfoReader, DirectoryInfoWriter, parse_str, render};
pub use parse::{ContentLineScanner, ParseError, ParseErrorKind, ScanOptions};
