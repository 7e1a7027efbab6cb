//! Registration settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the driver category checkboxes are validated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryRule {
    /// Every category must be checked.
    #[default]
    EachRequired,
    /// At least one category must be checked.
    AtLeastOne,
}

/// Settings for the registration page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// Category validation mode.
    pub category_rule: CategoryRule,
    /// Route opened after a successful registration.
    pub login_route: String,
    /// Notification shown after a successful registration.
    pub success_message: String,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            category_rule: CategoryRule::default(),
            login_route: "login".to_string(),
            success_message:
                "Registration successful, please check your email for verification instructions"
                    .to_string(),
        }
    }
}

impl RegisterConfig {
    /// Loads settings from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Sets the category rule.
    #[must_use]
    pub fn with_category_rule(mut self, rule: CategoryRule) -> Self {
        self.category_rule = rule;
        self
    }
}
