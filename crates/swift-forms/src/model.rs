//! Live form model: values, touched fields and current errors.

use tracing::debug;

use crate::error::ValidationErrors;
use crate::schema::Schema;
use crate::state::{FieldValue, FormState, TouchedState};

/// A form instance bound to a schema.
///
/// Errors are recomputed from scratch after every change, so they always
/// reflect the current values.
#[derive(Debug)]
pub struct FormModel {
    schema: Schema,
    values: FormState,
    touched: TouchedState,
    errors: ValidationErrors,
}

impl FormModel {
    /// Creates a model initialized from the schema defaults.
    pub fn new(schema: Schema) -> Self {
        let values = schema.default_state();
        let errors = schema.validate(&values);
        Self {
            schema,
            values,
            touched: TouchedState::new(),
            errors,
        }
    }

    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the current values.
    pub fn values(&self) -> &FormState {
        &self.values
    }

    /// Returns the current errors, including untouched fields.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns the current error of a field.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Returns the error of a field only once it has been touched.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.touched.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Returns whether a field has been touched.
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.is_touched(field)
    }

    /// Returns whether the current values pass validation.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Updates a field and revalidates.
    pub fn set_value(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.values.set(field, value);
        self.revalidate();
        debug!(
            field,
            affected = ?self.schema.affected_by(field),
            errors = self.errors.len(),
            "field changed"
        );
    }

    /// Marks a field as touched after it loses focus.
    pub fn blur(&mut self, field: &str) {
        self.touched.touch(field);
    }

    /// Marks every field as touched.
    pub fn touch_all(&mut self) {
        self.touched.touch_all(self.schema.field_names());
    }

    /// Restores defaults and forgets touches.
    pub fn reset(&mut self) {
        self.values = self.schema.default_state();
        self.touched.clear();
        self.revalidate();
    }

    /// Prepares a submission.
    ///
    /// Touches every field so all errors become visible, revalidates, and
    /// returns the values to submit or the errors blocking submission.
    pub fn prepare_submit(&mut self) -> Result<FormState, ValidationErrors> {
        self.touch_all();
        self.revalidate();
        if self.errors.is_empty() {
            Ok(self.values.clone())
        } else {
            debug!(errors = self.errors.len(), "submission blocked by validation");
            Err(self.errors.clone())
        }
    }

    fn revalidate(&mut self) {
        self.errors = self.schema.validate(&self.values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FormFieldDef};
    use crate::validation::{EmailValidator, MatchesField};

    fn model() -> FormModel {
        FormModel::new(
            Schema::builder()
                .field(
                    FormFieldDef::new("email", "Email", FieldKind::Email)
                        .required_with_message("Email is required")
                        .validator(EmailValidator::with_message("Email is invalid")),
                )
                .field(FormFieldDef::new("password", "Password", FieldKind::Password))
                .field(FormFieldDef::new("confirm", "Confirm", FieldKind::Password))
                .rule(MatchesField::new("confirm", "password").message("Passwords must match"))
                .build(),
        )
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = model();
        assert_eq!(form.error("email"), Some("Email is required"));
        assert_eq!(form.visible_error("email"), None);

        form.blur("email");
        assert_eq!(form.visible_error("email"), Some("Email is required"));
    }

    #[test]
    fn test_set_value_revalidates() {
        let mut form = model();
        form.set_value("email", "not-an-email");
        assert_eq!(form.error("email"), Some("Email is invalid"));
        form.set_value("email", "a@b.com");
        assert_eq!(form.error("email"), None);
        assert!(form.is_valid());
    }

    #[test]
    fn test_cross_field_reevaluated_on_either_change() {
        let mut form = model();
        form.set_value("email", "a@b.com");
        form.set_value("confirm", "secret1");
        assert_eq!(form.error("confirm"), Some("Passwords must match"));
        form.set_value("password", "secret1");
        assert_eq!(form.error("confirm"), None);
        form.set_value("password", "secret2");
        assert_eq!(form.error("confirm"), Some("Passwords must match"));
    }

    #[test]
    fn test_prepare_submit_touches_everything() {
        let mut form = model();
        let errors = form.prepare_submit().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert!(form.is_touched("password"));
        assert_eq!(form.visible_error("email"), Some("Email is required"));

        form.set_value("email", "a@b.com");
        let values = form.prepare_submit().unwrap();
        assert_eq!(values.text("email"), "a@b.com");
    }

    #[test]
    fn test_reset() {
        let mut form = model();
        form.set_value("email", "a@b.com");
        form.blur("email");
        form.reset();
        assert_eq!(form.values().text("email"), "");
        assert!(!form.is_touched("email"));
    }
}
