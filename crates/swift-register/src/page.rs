//! The driver registration page.

use std::sync::Arc;

use swift_forms::{
    FieldValue, FormModel, FormState, SubmissionController, SubmissionStatus, SubmitOutcome,
};
use tracing::debug;

use crate::config::RegisterConfig;
use crate::schema::registration_schema;
use crate::services::{
    AccountService, AccountSubmitter, AlertService, Navigator, RegistrationEffects,
};

/// Registration form bound to its collaborators.
///
/// Dropping the page shuts its submission controller down: an in-flight
/// registration is aborted and its alert and navigation never fire.
#[derive(Debug)]
pub struct RegisterPage {
    form: FormModel,
    controller: SubmissionController,
    config: RegisterConfig,
}

impl RegisterPage {
    /// Creates the page with injected collaborators.
    pub fn new(
        config: RegisterConfig,
        account: Arc<dyn AccountService>,
        alert: Arc<dyn AlertService>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let effects = RegistrationEffects {
            alert,
            navigator,
            success_message: config.success_message.clone(),
            login_route: config.login_route.clone(),
        };
        let controller =
            SubmissionController::new(Arc::new(AccountSubmitter(account)), Arc::new(effects));

        debug!(category_rule = ?config.category_rule, "registration page mounted");
        Self {
            form: FormModel::new(registration_schema(config.category_rule)),
            controller,
            config,
        }
    }

    /// Returns the page settings.
    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Returns the form model.
    pub fn form(&self) -> &FormModel {
        &self.form
    }

    /// Returns the current values.
    pub fn values(&self) -> &FormState {
        self.form.values()
    }

    /// Updates a field.
    pub fn set_value(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.form.set_value(field, value);
    }

    /// Fills several fields at once.
    pub fn fill(&mut self, values: &FormState) {
        for (field, value) in values.iter() {
            self.form.set_value(field, value.clone());
        }
    }

    /// Marks a field as left by the user.
    pub fn blur(&mut self, field: &str) {
        self.form.blur(field);
    }

    /// Returns the error to display next to a field.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        self.form.visible_error(field)
    }

    /// Returns the submission status.
    pub fn status(&self) -> SubmissionStatus {
        self.controller.status()
    }

    /// Returns whether the submit button is disabled and the spinner shown.
    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    /// Returns a handle to the submission controller.
    pub fn controller(&self) -> SubmissionController {
        self.controller.clone()
    }

    /// Route of the Cancel link.
    pub fn cancel_link_route(&self) -> &str {
        &self.config.login_route
    }

    /// Validates and submits the registration.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.controller.submit_form(&mut self.form).await
    }
}

impl Drop for RegisterPage {
    fn drop(&mut self) {
        self.controller.shutdown();
        debug!("registration page unmounted");
    }
}
