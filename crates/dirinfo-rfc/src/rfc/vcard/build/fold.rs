//! Line folding.

use dirinfo_core::types::LineEnding;

/// Folds a logical line so no physical line exceeds `max_octets`.
///
/// Continuation lines start with a single space, which counts toward the
/// limit. Folds fall between atomic units only: a UTF-8 scalar, a backslash
/// escape pair, a caret pair, or a `=XX` hex escape is never split. The
/// returned text has no trailing terminator.
#[must_use]
pub fn fold_line(line: &str, max_octets: usize, line_ending: LineEnding) -> String {
    if line.len() <= max_octets {
        return line.to_string();
    }

    let separator = line_ending.as_str();
    let mut result = String::with_capacity(
        line.len() + line.len() / max_octets.max(1) * (separator.len() + 1),
    );
    let mut current_len = 0;
    let mut rest = line;

    while !rest.is_empty() {
        let (unit, tail) = rest.split_at(unit_len(rest));

        if current_len > 0 && current_len + unit.len() > max_octets {
            result.push_str(separator);
            result.push(' ');
            current_len = 1; // The space
        }

        result.push_str(unit);
        current_len += unit.len();
        rest = tail;
    }

    result
}

/// Octet length of the atomic unit at the start of `rest`.
fn unit_len(rest: &str) -> usize {
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    match first {
        '\\' | '^' => first.len_utf8() + chars.next().map_or(0, char::len_utf8),
        '=' => match rest.as_bytes() {
            [_, a, b, ..] if a.is_ascii_hexdigit() && b.is_ascii_hexdigit() => 3,
            _ => 1,
        },
        _ => first.len_utf8(),
    }
}
