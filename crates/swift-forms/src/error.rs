//! Error types for forms.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// Validation failed with errors.
    #[error("validation errors: {0}")]
    ValidationErrors(ValidationErrors),

    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Invalid field value.
    #[error("invalid value for field {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Form data parsing error.
    #[error("failed to parse form data: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Error returned by a remote submission.
///
/// Carried to the error notification untouched: either a plain message or
/// whatever structured payload the remote side produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionError {
    /// Plain error message.
    #[error("{0}")]
    Message(String),

    /// Structured error object.
    #[error("{0}")]
    Payload(serde_json::Value),
}

impl SubmissionError {
    /// Creates a message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Per-field validation errors.
///
/// Holds at most one message per field: the first failing check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: HashMap<String, String>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Adds an error for a field unless it already has one.
    ///
    /// Returns `true` if the message was recorded.
    pub fn add(&mut self, field: &str, message: impl Into<String>) -> bool {
        if self.errors.contains_key(field) {
            return false;
        }
        self.errors.insert(field.to_string(), message.into());
        true
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether the field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Returns all errors sorted by field name.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        let mut all: Vec<_> = self
            .errors
            .iter()
            .map(|(field, msg)| (field.as_str(), msg.as_str()))
            .collect();
        all.sort_unstable();
        all
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, message) in self.all_errors() {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_wins() {
        let mut errors = ValidationErrors::new();
        assert!(errors.add("password", "Password is required"));
        assert!(!errors.add("password", "Password must be at least 6 characters"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_display_is_sorted() {
        let mut errors = ValidationErrors::new();
        errors.add("phone", "Phone number is not valid");
        errors.add("email", "Email is invalid");
        assert_eq!(
            errors.to_string(),
            "email: Email is invalid\nphone: Phone number is not valid\n"
        );
    }

    #[test]
    fn test_submission_error_payload_passthrough() {
        let err: SubmissionError =
            serde_json::from_str(r#"{"code": 409, "message": "taken"}"#).unwrap();
        assert!(matches!(err, SubmissionError::Payload(_)));

        let err: SubmissionError = serde_json::from_str(r#""boom""#).unwrap();
        assert_eq!(err, SubmissionError::message("boom"));
        assert_eq!(err.to_string(), "boom");
    }
}
