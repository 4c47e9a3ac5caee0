use thiserror::Error;

use crate::rfc::vcard::codec::QuotedPrintableError;
use crate::rfc::vcard::parse::ParseError;

/// Engine-level errors.
///
/// Line-level scan problems are normally recovered from and reported through
/// a diagnostic sink; they only surface here from strict single-line parsing.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    QuotedPrintable(#[from] QuotedPrintableError),

    #[error("Invalid content line: {0}")]
    InvalidContentLine(String),

    #[error(transparent)]
    CoreError(#[from] dirinfo_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
