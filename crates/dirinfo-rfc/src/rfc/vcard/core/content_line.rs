//! The logical content line.

use std::str::FromStr;

use serde::Serialize;

use super::parameter::Params;
use super::property::{PropertyName, is_valid_name};
use super::value::{StructuredValue, Value};
use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::codec::quoted_printable;
use crate::rfc::vcard::parse::{LineUnfolder, parse_content_line, split_structured};

/// One logical directory-information entry:
/// `[group.]NAME[;PARAM=VAL[,VAL]...]*:VALUE`.
///
/// The name keeps the case it was written in. Equality compares names and
/// parameter names ignoring ASCII case; group and values compare exactly.
///
/// Lines produced by the scanner are never mutated afterwards. Lines built
/// for writing go through [`ContentLine::new`] and the `with_*` builders,
/// which validate every name.
#[derive(Debug, Clone, Serialize)]
pub struct ContentLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    name: String,
    params: Params,
    value: StructuredValue,
}

impl ContentLine {
    /// Creates a line with no group and no parameters.
    ///
    /// The value is [normalized](StructuredValue::normalized): an empty value
    /// or an empty component is stored as one empty string, which is how it
    /// reads back after rendering.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidContentLine` if `name` is empty or contains
    /// characters other than ASCII alphanumerics, `-` and `_`.
    pub fn new(name: impl Into<String>, value: impl Into<StructuredValue>) -> RfcResult<Self> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(RfcError::InvalidContentLine(format!(
                "invalid property name: {name:?}"
            )));
        }
        Ok(Self {
            group: None,
            name,
            params: Params::new(),
            value: value.into().normalized(),
        })
    }

    /// Assembles a line whose name has already been validated.
    pub(crate) fn from_parts(
        group: Option<String>,
        name: String,
        params: Params,
        value: StructuredValue,
    ) -> Self {
        Self {
            group,
            name,
            params,
            value,
        }
    }

    /// Sets the group prefix. An empty group clears it.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidContentLine` if the group contains characters
    /// that would not survive a round trip.
    pub fn with_group(mut self, group: impl Into<String>) -> RfcResult<Self> {
        let group = group.into();
        if group.is_empty() {
            self.group = None;
            return Ok(self);
        }
        if !is_valid_name(&group) {
            return Err(RfcError::InvalidContentLine(format!(
                "invalid group: {group:?}"
            )));
        }
        self.group = Some(group);
        Ok(self)
    }

    /// Adds a parameter, merging with an existing one of the same name.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidContentLine` if the parameter name is invalid,
    /// or if a value holds a control character other than tab or newline.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> RfcResult<Self> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(RfcError::InvalidContentLine(format!(
                "invalid parameter name: {name:?}"
            )));
        }
        let value = value.into();
        if let Some(bad) = value.iter().find(|v| v.chars().any(is_unwritable_param_char)) {
            return Err(RfcError::InvalidContentLine(format!(
                "control character in value of parameter {name}: {bad:?}"
            )));
        }
        self.params.insert(name, value);
        Ok(self)
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Returns the name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized property name for dispatch.
    #[must_use]
    pub fn property(&self) -> PropertyName {
        PropertyName::parse(&self.name)
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Shorthand for `self.params().get(name)`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    #[must_use]
    pub fn value(&self) -> &StructuredValue {
        &self.value
    }

    /// Returns the whole value flattened to one string.
    #[must_use]
    pub fn text(&self) -> String {
        self.value.text()
    }

    /// Returns `TYPE` values and legacy bare-token types.
    #[must_use]
    pub fn types(&self) -> Vec<&str> {
        self.params.types()
    }

    /// Returns whether this is `BEGIN:<kind>`, e.g. `is_begin("VCARD")`.
    #[must_use]
    pub fn is_begin(&self, kind: &str) -> bool {
        self.property() == PropertyName::Begin && self.text().eq_ignore_ascii_case(kind)
    }

    /// Returns whether this is `END:<kind>`.
    #[must_use]
    pub fn is_end(&self, kind: &str) -> bool {
        self.property() == PropertyName::End && self.text().eq_ignore_ascii_case(kind)
    }

    #[must_use]
    pub fn into_parts(self) -> (Option<String>, String, Params, StructuredValue) {
        (self.group, self.name, self.params, self.value)
    }
}

/// Control characters with no parameter-value encoding. Tab is written as is
/// and newline as `^n`.
fn is_unwritable_param_char(c: char) -> bool {
    c.is_control() && c != '\t' && c != '\n'
}

impl PartialEq for ContentLine {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.name.eq_ignore_ascii_case(&other.name)
            && self.params == other.params
            && self.value == other.value
    }
}

impl Eq for ContentLine {}

impl FromStr for ContentLine {
    type Err = RfcError;

    /// Parses a single logical line strictly.
    ///
    /// Unlike the scanner, problems are returned instead of being reported
    /// and skipped, and a malformed quoted-printable value is an error.
    /// Folded input is accepted; the text must hold exactly one logical line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = LineUnfolder::new(s.as_bytes());
        let logical = lines.next_logical()?.ok_or_else(|| {
            RfcError::InvalidContentLine("input holds no content line".to_string())
        })?;
        if lines.next_logical()?.is_some() {
            return Err(RfcError::InvalidContentLine(
                "input holds more than one logical line".to_string(),
            ));
        }

        let raw = parse_content_line(&logical.text, logical.line)?;
        let text = if raw.params.is_quoted_printable() {
            let bytes = quoted_printable::decode(&raw.value)?;
            String::from_utf8(bytes).map_err(|e| {
                RfcError::InvalidContentLine(format!("decoded value is not UTF-8: {e}"))
            })?
        } else {
            raw.value
        };

        Ok(Self::from_parts(
            raw.group,
            raw.name,
            raw.params,
            split_structured(&text),
        ))
    }
}
