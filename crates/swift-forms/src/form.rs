//! Typed forms.

use crate::error::{FormError, Result, ValidationErrors};
use crate::schema::Schema;
use crate::state::{FieldValue, FormState};

/// A typed record that round-trips through [`FormState`].
pub trait Form: Sized {
    /// Builds the record from submitted values.
    fn from_state(state: &FormState) -> Result<Self>;

    /// Converts the record into field values.
    fn to_state(&self) -> FormState;

    /// Validates the record against a schema.
    fn validate(&self, schema: &Schema) -> std::result::Result<(), ValidationErrors> {
        let errors = schema.validate(&self.to_state());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds the record from a JSON object of field values.
    fn from_json(json: &str) -> Result<Self> {
        let state: FormState = serde_json::from_str(json)?;
        Self::from_state(&state)
    }
}

/// Reads a text field, failing when it is absent.
pub fn text_field(state: &FormState, field: &str) -> Result<String> {
    match state.get(field) {
        Some(FieldValue::Text(s)) => Ok(s.clone()),
        Some(FieldValue::Bool(_)) => Err(FormError::InvalidValue {
            field: field.to_string(),
            message: "expected text".to_string(),
        }),
        None => Err(FormError::MissingField(field.to_string())),
    }
}

/// Reads a checkbox field; absent checkboxes are unchecked.
pub fn checkbox_field(state: &FormState, field: &str) -> bool {
    state.is_checked(field)
}
