//! # swift-forms
//!
//! Declarative form validation and submission engine, independent of any
//! UI toolkit.
//!
//! This crate provides:
//! - Field values, form state and touched state
//! - Field validators and cross-field rules
//! - A declarative [`Schema`] evaluated as a pure function of the state
//! - A [`FormModel`] tracking values, touches and current errors
//! - A [`SubmissionController`] driving the async submission lifecycle
//!
//! ## Quick Start
//!
//! ```rust
//! use swift_forms::{FieldKind, FormFieldDef, FormModel, Schema};
//! use swift_forms::validation::{
//!     EmailValidator, MatchesField, MinLengthValidator,
//! };
//!
//! let schema = Schema::builder()
//!     .field(
//!         FormFieldDef::new("email", "Email", FieldKind::Email)
//!             .required_with_message("Email is required")
//!             .validator(EmailValidator::with_message("Email is invalid")),
//!     )
//!     .field(
//!         FormFieldDef::new("password", "Password", FieldKind::Password)
//!             .required()
//!             .validator(MinLengthValidator::new(6)),
//!     )
//!     .field(FormFieldDef::new("confirmPassword", "Confirm", FieldKind::Password))
//!     .rule(
//!         MatchesField::new("confirmPassword", "password")
//!             .message("Passwords must match"),
//!     )
//!     .build();
//!
//! let mut form = FormModel::new(schema);
//! form.set_value("email", "not-an-email");
//! assert_eq!(form.error("email"), Some("Email is invalid"));
//!
//! // Errors only show once a field has been left.
//! assert_eq!(form.visible_error("email"), None);
//! form.blur("email");
//! assert_eq!(form.visible_error("email"), Some("Email is invalid"));
//! ```
//!
//! ## Submission
//!
//! Implement [`Submitter`] for the remote operation and [`SubmitEffects`]
//! for what happens afterwards, then call
//! [`SubmissionController::submit_form`]. While a submission is in flight
//! further submits are no-ops; [`SubmissionController::cancel`] aborts the
//! call without firing effects.

mod error;
pub mod form;
mod model;
mod schema;
mod state;
pub mod submission;
pub mod validation;

pub use error::{FormError, Result, SubmissionError, ValidationErrors};
pub use form::Form;
pub use model::FormModel;
pub use schema::{FieldKind, FormFieldDef, Schema, SchemaBuilder};
pub use state::{FieldValue, FormState, TouchedState};
pub use submission::{
    SubmissionController, SubmissionStatus, SubmitEffects, SubmitOutcome, Submitter,
};
