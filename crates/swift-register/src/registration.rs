//! Typed driver registration record.

use serde::{Deserialize, Serialize};
use swift_forms::form::{checkbox_field, text_field};
use swift_forms::{Form, FormState};

use crate::schema::{
    ACCEPT_TERMS, CONFIRM_PASSWORD, DRIVER_LICENSE, EMAIL, FIRST_NAME, ID_NUMBER, LAST_NAME,
    PASSWORD, PHONE, PSV_LICENSE, SWIFT_BODA, SWIFT_MINI, SWIFT_PRIME, SWIFT_XTRA,
};

/// Driver service category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverCategory {
    Boda,
    Mini,
    Prime,
    Xtra,
}

impl DriverCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Boda, Self::Mini, Self::Prime, Self::Xtra];

    /// Name of the checkbox field for this category.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Boda => SWIFT_BODA,
            Self::Mini => SWIFT_MINI,
            Self::Prime => SWIFT_PRIME,
            Self::Xtra => SWIFT_XTRA,
        }
    }
}

/// Values submitted by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub id_number: String,
    pub driver_license: String,
    pub psv_license: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub swift_boda: bool,
    #[serde(default)]
    pub swift_mini: bool,
    #[serde(default)]
    pub swift_prime: bool,
    #[serde(default)]
    pub swift_xtra: bool,
    #[serde(default)]
    pub accept_terms: bool,
}

impl DriverRegistration {
    /// Returns the checked driver categories.
    pub fn selected_categories(&self) -> Vec<DriverCategory> {
        DriverCategory::ALL
            .into_iter()
            .filter(|category| self.is_selected(*category))
            .collect()
    }

    /// Returns whether a category is checked.
    pub const fn is_selected(&self, category: DriverCategory) -> bool {
        match category {
            DriverCategory::Boda => self.swift_boda,
            DriverCategory::Mini => self.swift_mini,
            DriverCategory::Prime => self.swift_prime,
            DriverCategory::Xtra => self.swift_xtra,
        }
    }
}

impl Form for DriverRegistration {
    fn from_state(state: &FormState) -> swift_forms::Result<Self> {
        Ok(Self {
            first_name: text_field(state, FIRST_NAME)?,
            last_name: text_field(state, LAST_NAME)?,
            email: text_field(state, EMAIL)?,
            phone: state.text(PHONE).into_owned(),
            id_number: text_field(state, ID_NUMBER)?,
            driver_license: text_field(state, DRIVER_LICENSE)?,
            psv_license: text_field(state, PSV_LICENSE)?,
            password: text_field(state, PASSWORD)?,
            confirm_password: text_field(state, CONFIRM_PASSWORD)?,
            swift_boda: checkbox_field(state, SWIFT_BODA),
            swift_mini: checkbox_field(state, SWIFT_MINI),
            swift_prime: checkbox_field(state, SWIFT_PRIME),
            swift_xtra: checkbox_field(state, SWIFT_XTRA),
            accept_terms: checkbox_field(state, ACCEPT_TERMS),
        })
    }

    fn to_state(&self) -> FormState {
        FormState::new()
            .with(FIRST_NAME, self.first_name.as_str())
            .with(LAST_NAME, self.last_name.as_str())
            .with(EMAIL, self.email.as_str())
            .with(PHONE, self.phone.as_str())
            .with(ID_NUMBER, self.id_number.as_str())
            .with(DRIVER_LICENSE, self.driver_license.as_str())
            .with(PSV_LICENSE, self.psv_license.as_str())
            .with(PASSWORD, self.password.as_str())
            .with(CONFIRM_PASSWORD, self.confirm_password.as_str())
            .with(SWIFT_BODA, self.swift_boda)
            .with(SWIFT_MINI, self.swift_mini)
            .with(SWIFT_PRIME, self.swift_prime)
            .with(SWIFT_XTRA, self.swift_xtra)
            .with(ACCEPT_TERMS, self.accept_terms)
    }
}
