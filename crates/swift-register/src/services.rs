//! Collaborators of the registration page.
//!
//! The page never talks to a concrete backend: account creation,
//! notifications and navigation are injected through these traits.

use std::sync::Arc;

use futures::future::BoxFuture;
use swift_forms::{FormState, SubmissionError, SubmitEffects, Submitter};
use tracing::{error, info};

/// Remote account operations.
pub trait AccountService: Send + Sync {
    /// Registers a new account from the submitted fields.
    fn register<'a>(&'a self, fields: &'a FormState)
        -> BoxFuture<'a, Result<(), SubmissionError>>;
}

/// Options for a success notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertOptions {
    /// Keep the notification visible after the next navigation.
    pub keep_after_route_change: bool,
}

/// User-facing notifications.
pub trait AlertService: Send + Sync {
    /// Shows a success notification.
    fn success(&self, message: &str, options: AlertOptions);

    /// Shows an error notification with the payload as received.
    fn error(&self, payload: &SubmissionError);
}

/// Navigation between views.
pub trait Navigator: Send + Sync {
    /// Opens the named route.
    fn navigate(&self, route: &str);
}

/// Submits forms through an [`AccountService`].
pub(crate) struct AccountSubmitter(pub(crate) Arc<dyn AccountService>);

impl Submitter for AccountSubmitter {
    fn submit<'a>(&'a self, values: &'a FormState) -> BoxFuture<'a, Result<(), SubmissionError>> {
        self.0.register(values)
    }
}

/// Maps submission outcomes to alerts and navigation.
pub(crate) struct RegistrationEffects {
    pub(crate) alert: Arc<dyn AlertService>,
    pub(crate) navigator: Arc<dyn Navigator>,
    pub(crate) success_message: String,
    pub(crate) login_route: String,
}

impl SubmitEffects for RegistrationEffects {
    fn on_success(&self) {
        self.alert.success(
            &self.success_message,
            AlertOptions {
                keep_after_route_change: true,
            },
        );
        self.navigator.navigate(&self.login_route);
    }

    fn on_failure(&self, error: &SubmissionError) {
        self.alert.error(error);
    }
}

/// Alert service that writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlerts;

impl AlertService for TracingAlerts {
    fn success(&self, message: &str, options: AlertOptions) {
        info!(
            keep_after_route_change = options.keep_after_route_change,
            "{message}"
        );
    }

    fn error(&self, payload: &SubmissionError) {
        error!("{payload}");
    }
}

/// Navigator that writes route changes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "navigate");
    }
}
