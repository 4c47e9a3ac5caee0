//! Content-line parameters.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::value::Value;
use dirinfo_core::constants::QUOTED_PRINTABLE;

/// Parameters of a content line, in order of first appearance.
///
/// Names keep the case they were written in; every lookup compares names
/// ignoring ASCII case. A name that appears twice (`TYPE=WORK;TYPE=VOICE`)
/// is merged into its first entry.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds `value` under `name`, appending to an existing entry of the same
    /// name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some((_, existing)) = self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            for v in value.into_inner() {
                existing.push(v);
            }
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Returns the first string stored under `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::first)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns whether the parameter `name` lists `value` (both ignoring case).
    #[must_use]
    pub fn has_value(&self, name: &str, value: &str) -> bool {
        self.get(name).is_some_and(|v| v.contains_ignore_case(value))
    }

    /// Removes and returns the entry for `name`.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self
            .entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether the value is declared quoted-printable, either as
    /// `ENCODING=QUOTED-PRINTABLE` or as the bare vCard 2.1 token.
    #[must_use]
    pub fn is_quoted_printable(&self) -> bool {
        self.has_value("ENCODING", QUOTED_PRINTABLE)
            || self.get(QUOTED_PRINTABLE).is_some_and(Value::is_empty)
    }

    /// Returns the `TYPE` values followed by the names of bare tokens.
    ///
    /// Older producers write `TEL;WORK;VOICE:` instead of `TEL;TYPE=WORK,VOICE:`.
    #[must_use]
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .get("TYPE")
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default();
        types.extend(
            self.entries
                .iter()
                .filter(|(n, v)| v.is_empty() && !n.eq_ignore_ascii_case(QUOTED_PRINTABLE))
                .map(|(n, _)| n.as_str()),
        );
        types
    }
}

impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((n1, v1), (n2, v2))| n1.eq_ignore_ascii_case(n2) && v1 == v2)
    }
}

impl Eq for Params {}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<N: Into<String>> FromIterator<(N, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
