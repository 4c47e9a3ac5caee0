/// Recommended maximum physical line length in octets (RFC 2425 §5.8.1).
pub const DEFAULT_MAX_LINE_OCTETS: usize = 75;

/// Smallest fold width accepted by configuration validation.
///
/// A continuation line needs room for the leading space plus the widest
/// atomic fold unit (a 4-octet UTF-8 scalar or a `=XX` escape).
pub const MIN_MAX_LINE_OCTETS: usize = 8;

/// Canonical encoding name for the `ENCODING` parameter.
pub const QUOTED_PRINTABLE: &str = "QUOTED-PRINTABLE";
