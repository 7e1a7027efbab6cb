//! Field definitions and the declarative form schema.

use std::fmt;

use crate::error::ValidationErrors;
use crate::state::{FieldValue, FormState};
use crate::validation::{Rule, Validator};

/// Input kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text input.
    Text,
    /// Email input.
    Email,
    /// Telephone input.
    Tel,
    /// Password input.
    Password,
    /// Checkbox.
    Checkbox,
}

impl FieldKind {
    /// Value a field of this kind starts with.
    pub fn default_value(self) -> FieldValue {
        match self {
            Self::Checkbox => FieldValue::Bool(false),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// Definition of a form field.
pub struct FormFieldDef {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Whether the field is required.
    pub required: bool,
    /// Message reported when a required field is blank. Defaults to
    /// `"<label> is required"`.
    pub required_message: Option<String>,
    /// Initial value.
    pub initial: Option<FieldValue>,
    /// Validators, run in order.
    pub validators: Vec<Box<dyn Validator>>,
}

impl fmt::Debug for FormFieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormFieldDef")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

impl FormFieldDef {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            required_message: None,
            initial: None,
            validators: Vec::new(),
        }
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Makes the field required with a custom blank message.
    #[must_use]
    pub fn required_with_message(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.required_message = Some(message.into());
        self
    }

    /// Sets initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Returns the value this field starts with.
    pub fn initial_value(&self) -> FieldValue {
        self.initial
            .clone()
            .unwrap_or_else(|| self.kind.default_value())
    }

    /// Returns the message reported when a required field is blank.
    pub fn required_error(&self) -> String {
        self.required_message
            .clone()
            .unwrap_or_else(|| format!("{} is required", self.label))
    }

    fn check(&self, value: &FieldValue) -> Result<(), String> {
        // a checkbox value posted to a text input is no text at all
        let blank;
        let value = match value {
            FieldValue::Bool(_) if self.kind != FieldKind::Checkbox => {
                blank = self.kind.default_value();
                &blank
            }
            _ => value,
        };

        if self.required && value.is_blank() {
            return Err(self.required_error());
        }
        self.validators
            .iter()
            .try_for_each(|validator| validator.validate(value))
    }
}

/// A declarative set of fields and cross-field rules.
///
/// Validation is a pure function of the [`FormState`] passed in.
#[derive(Default)]
pub struct Schema {
    fields: Vec<FormFieldDef>,
    rules: Vec<Box<dyn Rule>>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl Schema {
    /// Starts building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Returns the field definitions in declaration order.
    pub fn fields(&self) -> &[FormFieldDef] {
        &self.fields
    }

    /// Returns a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FormFieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns all field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Builds the default state from each field's initial value.
    pub fn default_state(&self) -> FormState {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.initial_value()))
            .collect()
    }

    /// Returns the fields whose result can change when `field` changes.
    pub fn affected_by(&self, field: &str) -> Vec<&str> {
        let mut affected = vec![];
        if let Some(def) = self.field(field) {
            affected.push(def.name.as_str());
        }
        for rule in &self.rules {
            if rule.depends_on().contains(&field) {
                for target in rule.targets() {
                    if !affected.contains(&target) {
                        affected.push(target);
                    }
                }
            }
        }
        affected
    }

    /// Validates the whole state.
    ///
    /// Required fields are checked first, then field validators in order,
    /// and the first failure of a field is kept. Cross-field rules then report only on fields that
    /// are still error-free. Missing fields are treated as their default.
    pub fn validate(&self, state: &FormState) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            let result = match state.get(&field.name) {
                Some(value) => field.check(value),
                None => field.check(&field.kind.default_value()),
            };
            if let Err(message) = result {
                errors.add(&field.name, message);
            }
        }

        for rule in &self.rules {
            let targets = rule.targets();
            if targets.iter().all(|t| errors.contains(t)) {
                continue;
            }
            if let Err(message) = rule.check(state) {
                for target in targets {
                    errors.add(target, message.clone());
                }
            }
        }

        errors
    }
}

/// Builder for [`Schema`].
#[derive(Default)]
pub struct SchemaBuilder {
    fields: Vec<FormFieldDef>,
    rules: Vec<Box<dyn Rule>>,
}

impl SchemaBuilder {
    /// Adds a field to the schema.
    #[must_use]
    pub fn field(mut self, field: FormFieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a cross-field rule.
    #[must_use]
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns the schema.
    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
            rules: self.rules,
        }
    }
}
