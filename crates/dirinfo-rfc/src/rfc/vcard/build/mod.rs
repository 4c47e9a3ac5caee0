//! Content-line serialization.
//!
//! ## Usage
//!
//! ```rust
//! use dirinfo_rfc::rfc::vcard::build::ContentLineWriter;
//! use dirinfo_rfc::rfc::vcard::core::{ContentLine, Value};
//!
//! let tel = ContentLine::new("TEL", "+1-555-555-5555")
//!     .unwrap()
//!     .with_param("TYPE", Value::from_iter(["WORK", "VOICE"]))
//!     .unwrap();
//!
//! let mut writer = ContentLineWriter::new(Vec::new());
//! writer.write_line(&tel).unwrap();
//! assert_eq!(
//!     writer.into_inner(),
//!     b"TEL;TYPE=WORK,VOICE:+1-555-555-5555\r\n"
//! );
//! ```
//!
//! ## Features
//!
//! - Escapes `\`, `;`, `,` and line breaks in values
//! - RFC 6868 caret encoding and quoting for parameter values
//! - Folds at a configurable octet width without splitting escapes or UTF-8
//!   sequences
//! - CRLF or LF terminators

mod escape;
mod fold;
mod writer;

pub use escape::{escape_component, escape_param_value, join_structured, join_value};
pub use fold::fold_line;
pub use writer::{ContentLineWriter, WriteOptions, render_line, render_unfolded};
