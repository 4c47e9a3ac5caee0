//! Structured-value splitting.
//!
//! `;` separates components and `,` separates the strings inside a
//! component. A backslash before `;`, `,` or `\` makes that character
//! literal; `\n` and `\N` stand for a line break. Any other backslash pair is
//! kept as written.

use crate::rfc::vcard::core::{StructuredValue, Value};

/// Splits raw value text into components and their strings.
///
/// The result always has at least one component and every component at
/// least one string, so `split_structured("")` is `[[""]]`.
#[must_use]
pub fn split_structured(raw: &str) -> StructuredValue {
    let mut components = Vec::new();
    let mut component = Value::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => push_unescaped(&mut current, chars.next()),
            ',' => component.push(std::mem::take(&mut current)),
            ';' => {
                component.push(std::mem::take(&mut current));
                components.push(std::mem::take(&mut component));
            }
            _ => current.push(c),
        }
    }

    component.push(current);
    components.push(component);
    StructuredValue::new(components)
}

/// Appends the meaning of a backslash followed by `next`.
fn push_unescaped(out: &mut String, next: Option<char>) {
    match next {
        Some(c @ (';' | ',' | '\\')) => out.push(c),
        Some('n' | 'N') => out.push('\n'),
        Some(other) => {
            out.push('\\');
            out.push(other);
        }
        None => out.push('\\'),
    }
}
