//! The driver registration rule set.

use swift_forms::validation::{
    AtLeastOneChecked, EmailValidator, MatchesField, MinLengthValidator, MustBeTrueValidator,
    PhoneValidator,
};
use swift_forms::{FieldKind, FormFieldDef, Schema};

use crate::config::CategoryRule;

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const ID_NUMBER: &str = "idNumber";
pub const DRIVER_LICENSE: &str = "driverLicense";
pub const PSV_LICENSE: &str = "psvLicense";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";
pub const SWIFT_BODA: &str = "swiftBoda";
pub const SWIFT_MINI: &str = "swiftMini";
pub const SWIFT_PRIME: &str = "swiftPrime";
pub const SWIFT_XTRA: &str = "swiftXtra";
pub const ACCEPT_TERMS: &str = "acceptTerms";

/// Driver category checkboxes, in display order.
pub const CATEGORY_FIELDS: [&str; 4] = [SWIFT_BODA, SWIFT_MINI, SWIFT_PRIME, SWIFT_XTRA];

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Fixed error messages.
pub mod messages {
    pub const FIRST_NAME_REQUIRED: &str = "First Name is required";
    pub const LAST_NAME_REQUIRED: &str = "Last Name is required";
    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const EMAIL_INVALID: &str = "Email is invalid";
    pub const PHONE_INVALID: &str = "Phone number is not valid";
    pub const ID_REQUIRED: &str = "ID is required";
    pub const DRIVER_LICENSE_REQUIRED: &str = "Driver License is required";
    pub const PSV_LICENSE_REQUIRED: &str = "PSV License is required";
    pub const PASSWORD_REQUIRED: &str = "Password is required";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
    pub const CONFIRM_PASSWORD_REQUIRED: &str = "Confirm Password is required";
    pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";
    pub const ACCEPT_TERMS_REQUIRED: &str = "Accept Terms & Conditions is required";
    pub const SELECT_DRIVER_OPTION: &str = "Select one of the driver options";
}

fn required_text(name: &str, label: &str, kind: FieldKind, message: &str) -> FormFieldDef {
    FormFieldDef::new(name, label, kind).required_with_message(message)
}

/// Builds the registration schema.
pub fn registration_schema(category_rule: CategoryRule) -> Schema {
    let mut builder = Schema::builder()
        .field(required_text(
            FIRST_NAME,
            "First Name",
            FieldKind::Text,
            messages::FIRST_NAME_REQUIRED,
        ))
        .field(required_text(
            LAST_NAME,
            "Last Name",
            FieldKind::Text,
            messages::LAST_NAME_REQUIRED,
        ))
        .field(
            required_text(EMAIL, "Email", FieldKind::Email, messages::EMAIL_REQUIRED)
                .validator(EmailValidator::with_message(messages::EMAIL_INVALID)),
        )
        .field(
            FormFieldDef::new(PHONE, "Phone", FieldKind::Tel)
                .validator(PhoneValidator::with_message(messages::PHONE_INVALID)),
        )
        .field(required_text(
            ID_NUMBER,
            "ID Number",
            FieldKind::Text,
            messages::ID_REQUIRED,
        ))
        .field(required_text(
            DRIVER_LICENSE,
            "Driver's License",
            FieldKind::Text,
            messages::DRIVER_LICENSE_REQUIRED,
        ))
        .field(required_text(
            PSV_LICENSE,
            "PSV License",
            FieldKind::Text,
            messages::PSV_LICENSE_REQUIRED,
        ))
        .field(
            required_text(
                PASSWORD,
                "Password",
                FieldKind::Password,
                messages::PASSWORD_REQUIRED,
            )
            .validator(MinLengthValidator::with_message(
                MIN_PASSWORD_LENGTH,
                messages::PASSWORD_TOO_SHORT,
            )),
        )
        .field(required_text(
            CONFIRM_PASSWORD,
            "Confirm Password",
            FieldKind::Password,
            messages::CONFIRM_PASSWORD_REQUIRED,
        ));

    for (name, label) in CATEGORY_FIELDS
        .into_iter()
        .zip(["Swift Boda", "Swift Mini", "Swift Prime", "Swift Xtra"])
    {
        let mut field = FormFieldDef::new(name, label, FieldKind::Checkbox);
        if category_rule == CategoryRule::EachRequired {
            field = field.validator(MustBeTrueValidator::with_message(
                messages::SELECT_DRIVER_OPTION,
            ));
        }
        builder = builder.field(field);
    }

    builder = builder
        .field(
            FormFieldDef::new(ACCEPT_TERMS, "Accept Terms & Conditions", FieldKind::Checkbox)
                .validator(MustBeTrueValidator::with_message(
                    messages::ACCEPT_TERMS_REQUIRED,
                )),
        )
        .rule(MatchesField::new(CONFIRM_PASSWORD, PASSWORD).message(messages::PASSWORDS_MUST_MATCH));

    if category_rule == CategoryRule::AtLeastOne {
        builder = builder
            .rule(AtLeastOneChecked::new(CATEGORY_FIELDS).message(messages::SELECT_DRIVER_OPTION));
    }

    builder.build()
}
