//! Field validators and cross-field rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::state::{FieldValue, FormState};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?(?:[0-9]|[ \-]|\([0-9]{1,4}\))+$").expect("valid phone regex")
});

/// Trait for single-field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &FieldValue) -> Result<(), String>;
}

/// Validator that requires a non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_blank() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.as_text().chars().count() > self.max_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Ensure this value has at least {min_length} characters."),
        }
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.as_text().chars().count() < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Validator for email addresses. Empty values pass; pair with
/// [`RequiredValidator`] when the field is mandatory.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid email address.".to_string(),
        }
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        let text = value.as_text();
        if text.is_empty() || EMAIL_REGEX.is_match(&text) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator for international phone numbers.
///
/// Accepts an optional leading `+`, digits, spaces, hyphens and
/// parenthesised digit groups, with 3 to 14 digits in total. Empty values
/// pass.
#[derive(Debug, Clone)]
pub struct PhoneValidator {
    message: String,
}

impl PhoneValidator {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 3;
    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 14;

    /// Creates a new PhoneValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid phone number.".to_string(),
        }
    }

    /// Creates a new PhoneValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for PhoneValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PhoneValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        let text = value.as_text();
        if text.is_empty() {
            return Ok(());
        }

        let digits = text.chars().filter(char::is_ascii_digit).count();
        if PHONE_REGEX.is_match(&text) && (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits)
        {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if self.pattern.is_match(&value.as_text()) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Validator that requires a checked checkbox.
#[derive(Debug, Clone)]
pub struct MustBeTrueValidator {
    message: String,
}

impl MustBeTrueValidator {
    /// Creates a new MustBeTrueValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This box must be checked.".to_string(),
        }
    }

    /// Creates a new MustBeTrueValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for MustBeTrueValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for MustBeTrueValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if value.is_checked() {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// A rule evaluated against the whole form.
///
/// Each rule reports against its target fields; it is re-evaluated
/// whenever any of its dependencies change.
pub trait Rule: Send + Sync {
    /// Fields that receive this rule's error.
    fn targets(&self) -> Vec<&str>;

    /// Fields this rule reads.
    fn depends_on(&self) -> Vec<&str>;

    /// Checks the rule against the current state.
    fn check(&self, state: &FormState) -> Result<(), String>;
}

/// Requires a field to equal another field's current value.
#[derive(Debug, Clone)]
pub struct MatchesField {
    field: String,
    other: String,
    message: String,
}

impl MatchesField {
    /// Creates a rule requiring `field` to equal `other`.
    pub fn new(field: impl Into<String>, other: impl Into<String>) -> Self {
        let other = other.into();
        Self {
            field: field.into(),
            message: format!("Must match {other}."),
            other,
        }
    }

    /// Sets a custom message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Rule for MatchesField {
    fn targets(&self) -> Vec<&str> {
        vec![self.field.as_str()]
    }

    fn depends_on(&self) -> Vec<&str> {
        vec![self.field.as_str(), self.other.as_str()]
    }

    fn check(&self, state: &FormState) -> Result<(), String> {
        if state.text(&self.field) == state.text(&self.other) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Requires at least one checkbox of a group to be checked.
#[derive(Debug, Clone)]
pub struct AtLeastOneChecked {
    fields: Vec<String>,
    message: String,
}

impl AtLeastOneChecked {
    /// Creates a rule over the given checkbox fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            message: "Select at least one option.".to_string(),
        }
    }

    /// Sets a custom message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Rule for AtLeastOneChecked {
    fn targets(&self) -> Vec<&str> {
        self.fields.iter().map(String::as_str).collect()
    }

    fn depends_on(&self) -> Vec<&str> {
        self.targets()
    }

    fn check(&self, state: &FormState) -> Result<(), String> {
        if self.fields.iter().any(|f| state.is_checked(f)) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}
