//! Directory-information (RFC 2425/2426) content-line engine.
//!
//! See [`rfc::vcard`] for the scanner, writer and value grammar.

pub mod error;
pub mod rfc;
