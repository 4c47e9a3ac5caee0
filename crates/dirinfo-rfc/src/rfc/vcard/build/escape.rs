//! Value and parameter escaping, the inverse of value splitting.

use crate::rfc::vcard::core::{StructuredValue, Value};

/// Joins a structured value back into wire text.
///
/// Inverse of [`split_structured`](crate::rfc::vcard::parse::split_structured)
/// for any value whose strings hold no `\r`.
#[must_use]
pub fn join_structured(value: &StructuredValue) -> String {
    value
        .iter()
        .map(join_value)
        .collect::<Vec<_>>()
        .join(";")
}

/// Joins one component, escaping each string.
#[must_use]
pub fn join_value(value: &Value) -> String {
    value
        .iter()
        .map(|s| escape_component(s))
        .collect::<Vec<_>>()
        .join(",")
}

/// Escapes one string of a structured value.
///
/// Escapes backslash, newline, comma, and semicolon.
#[must_use]
pub fn escape_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {} // Skip CR (use \n for newlines)
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a parameter value for serialization.
///
/// Uses RFC 6868 caret encoding for special characters. Other control
/// characters are written as they are; [`ContentLine::with_param`] refuses
/// them on lines built for writing.
/// Returns `(value, needs_quotes)`.
///
/// [`ContentLine::with_param`]: crate::rfc::vcard::core::ContentLine::with_param
#[must_use]
pub fn escape_param_value(s: &str) -> (String, bool) {
    let mut result = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '^' => result.push_str("^^"),
            '\n' => result.push_str("^n"),
            '"' => {
                result.push_str("^'");
                needs_quotes = true;
            }
            ':' | ';' | ',' | '\\' | '\t' => {
                result.push(c);
                needs_quotes = true;
            }
            _ => result.push(c),
        }
    }

    (result, needs_quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::parse::split_structured;

    #[test]
    fn escape_component_special() {
        assert_eq!(escape_component("a,b;c\\d"), "a\\,b\\;c\\\\d");
        assert_eq!(escape_component("line1\r\nline2"), "line1\\nline2");
    }

    #[test]
    fn join_both_levels() {
        let value = StructuredValue::new(vec![
            Value::single("Public"),
            Value::single("John"),
            Value::from_iter(["Esq.", "Jr."]),
        ]);
        assert_eq!(join_structured(&value), "Public;John;Esq.,Jr.");
    }

    #[test]
    fn join_escapes_literal_delimiters() {
        let value = StructuredValue::new(vec![Value::single("a;b"), Value::single("c")]);
        assert_eq!(join_structured(&value), "a\\;b;c");
    }

    #[test]
    fn join_then_split_restores_value() {
        let value = StructuredValue::new(vec![
            Value::from_iter(["back\\slash", "com,ma"]),
            Value::single(""),
            Value::single("semi;colon\nnewline"),
        ]);
        assert_eq!(split_structured(&join_structured(&value)), value);
    }

    #[test]
    fn escape_param_no_quotes() {
        let (val, needs_quotes) = escape_param_value("simple");
        assert_eq!(val, "simple");
        assert!(!needs_quotes);
    }

    #[test]
    fn escape_param_with_colon() {
        let (val, needs_quotes) = escape_param_value("value:with:colons");
        assert_eq!(val, "value:with:colons");
        assert!(needs_quotes);
    }

    #[test]
    fn escape_param_with_backslash() {
        let (val, needs_quotes) = escape_param_value("C:\\dir");
        assert_eq!(val, "C:\\dir");
        assert!(needs_quotes);
    }

    #[test]
    fn escape_param_with_newline() {
        let (val, _) = escape_param_value("line1\nline2");
        assert_eq!(val, "line1^nline2");
    }

    #[test]
    fn escape_param_with_quote() {
        let (val, needs_quotes) = escape_param_value("say \"hello\"");
        assert_eq!(val, "say ^'hello^'");
        assert!(needs_quotes);
    }

    #[test]
    fn escape_param_with_caret() {
        let (val, _) = escape_param_value("a^b");
        assert_eq!(val, "a^^b");
    }

    #[test]
    fn escape_param_keeps_tab() {
        let (val, needs_quotes) = escape_param_value("a\tb");
        assert_eq!(val, "a\tb");
        assert!(needs_quotes);
    }

    #[test]
    fn escape_param_keeps_other_controls() {
        let (val, _) = escape_param_value("a\u{7}b");
        assert_eq!(val, "a\u{7}b");
    }
}
