//! Multi-string values and semicolon-structured values.

use serde::Serialize;

/// An ordered list of strings, comma-separated on the wire.
///
/// Used both for the components of a [`StructuredValue`] and for parameter
/// values (`TYPE=WORK,VOICE`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Value(Vec<String>);

impl Value {
    /// Separator used by [`Value::text`] when flattening a list.
    pub const TEXT_SEPARATOR: &'static str = ",";

    /// Creates a value with no elements.
    ///
    /// As a parameter value this renders as a bare token (`;BASE64`).
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a value holding exactly one string.
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        Self(vec![text.into()])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.0.push(text.into());
    }

    /// Returns whether any element equals `text`, ignoring ASCII case.
    #[must_use]
    pub fn contains_ignore_case(&self, text: &str) -> bool {
        self.0.iter().any(|v| v.eq_ignore_ascii_case(text))
    }

    /// Flattens the list into one string joined by [`Value::TEXT_SEPARATOR`].
    ///
    /// For properties that are not really multi-valued (`FN`, `NOTE`) this
    /// restores an unescaped comma the producer forgot to escape.
    #[must_use]
    pub fn text(&self) -> String {
        self.0.join(Self::TEXT_SEPARATOR)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::single(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::single(text)
    }
}

impl<S: Into<String>> FromIterator<S> for Value {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A property value split on unescaped `;` into positional components.
///
/// Positions carry meaning per property (family name is component 0 of `N`),
/// but this type does not know or enforce any arity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StructuredValue(Vec<Value>);

impl StructuredValue {
    /// Separator used by [`StructuredValue::text`] between components.
    pub const COMPONENT_SEPARATOR: &'static str = ";";

    #[must_use]
    pub fn new(components: Vec<Value>) -> Self {
        Self(components)
    }

    /// Creates a value with one component holding one string.
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        Self(vec![Value::single(text)])
    }

    #[must_use]
    pub fn components(&self) -> &[Value] {
        &self.0
    }

    /// Returns the component at `index`, if present.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Flattens every component with [`Value::text`] and joins them with `;`.
    #[must_use]
    pub fn text(&self) -> String {
        self.0
            .iter()
            .map(Value::text)
            .collect::<Vec<_>>()
            .join(Self::COMPONENT_SEPARATOR)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    /// Gives every empty component one empty string, and an empty value one
    /// such component, so the result has the shape a parser produces.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.0.is_empty() {
            self.0.push(Value::new());
        }
        for component in &mut self.0 {
            if component.is_empty() {
                component.push(String::new());
            }
        }
        self
    }
}

impl From<Vec<Value>> for StructuredValue {
    fn from(components: Vec<Value>) -> Self {
        Self(components)
    }
}

impl From<Value> for StructuredValue {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}

impl From<&str> for StructuredValue {
    fn from(text: &str) -> Self {
        Self::single(text)
    }
}

impl From<String> for StructuredValue {
    fn from(text: String) -> Self {
        Self(vec![Value::from(text)])
    }
}

impl FromIterator<Value> for StructuredValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StructuredValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
