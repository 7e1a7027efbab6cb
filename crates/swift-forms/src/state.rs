//! Field values, form state and touched state.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single form field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text input value.
    Text(String),
    /// Checkbox value.
    Bool(bool),
}

impl FieldValue {
    /// Returns the value as text. Booleans render as `"true"`/`"false"`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Bool(b) => Cow::Owned(b.to_string()),
        }
    }

    /// Returns whether this value counts as a checked checkbox.
    ///
    /// Accepts `"true"` and `"on"` so values posted by HTML forms behave
    /// like booleans.
    pub fn is_checked(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => matches!(s.as_str(), "true" | "on"),
        }
    }

    /// Returns whether this is an empty text value.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(_) => false,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Current values of every field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    values: HashMap<String, FieldValue>,
}

impl FormState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, returning the previous one.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(field.to_string(), value.into())
    }

    /// Builder form of [`FormState::set`].
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the value of a field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Returns the text of a field, or `""` when missing.
    pub fn text(&self, field: &str) -> Cow<'_, str> {
        self.values
            .get(field)
            .map_or(Cow::Borrowed(""), FieldValue::as_text)
    }

    /// Returns whether a field holds a checked value.
    pub fn is_checked(&self, field: &str) -> bool {
        self.values.get(field).is_some_and(FieldValue::is_checked)
    }

    /// Returns whether the field is present.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Iterates over all `(field, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Fields the user has interacted with.
#[derive(Debug, Clone, Default)]
pub struct TouchedState {
    fields: HashSet<String>,
}

impl TouchedState {
    /// Creates an empty touched set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a field as touched. Returns `true` on the first touch.
    pub fn touch(&mut self, field: &str) -> bool {
        self.fields.insert(field.to_string())
    }

    /// Marks every given field as touched.
    pub fn touch_all<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
        self.fields.extend(fields.into_iter().map(str::to_string));
    }

    /// Returns whether a field has been touched.
    pub fn is_touched(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Forgets all touches.
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_checked() {
        assert!(FieldValue::Bool(true).is_checked());
        assert!(!FieldValue::Bool(false).is_checked());
        assert!(FieldValue::from("on").is_checked());
        assert!(!FieldValue::from("").is_checked());
    }

    #[test]
    fn test_form_state_from_json() {
        let state: FormState =
            serde_json::from_str(r#"{"email": "a@b.com", "acceptTerms": true}"#).unwrap();
        assert_eq!(state.text("email"), "a@b.com");
        assert!(state.is_checked("acceptTerms"));
        assert_eq!(state.text("missing"), "");
    }

    #[test]
    fn test_form_state_serializes_flat() {
        let state = FormState::new().with("phone", "").with("swiftBoda", false);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phone"], "");
        assert_eq!(json["swiftBoda"], false);
    }

    #[test]
    fn test_touched_state() {
        let mut touched = TouchedState::new();
        assert!(touched.touch("email"));
        assert!(!touched.touch("email"));
        touched.touch_all(["password", "phone"]);
        assert!(touched.is_touched("phone"));
        touched.clear();
        assert!(!touched.is_touched("email"));
    }
}
