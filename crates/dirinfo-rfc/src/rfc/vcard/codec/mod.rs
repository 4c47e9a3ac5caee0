//! Transfer encodings recognized in the `ENCODING` parameter.

pub mod quoted_printable;

pub use quoted_printable::QuotedPrintableError;
