//! Shared fixtures for unit tests.

use std::sync::Mutex;

use futures::future::BoxFuture;
use swift_forms::{FormState, SubmissionError};

use crate::schema::{
    ACCEPT_TERMS, CONFIRM_PASSWORD, DRIVER_LICENSE, EMAIL, FIRST_NAME, ID_NUMBER, LAST_NAME,
    PASSWORD, PHONE, PSV_LICENSE, SWIFT_BODA, SWIFT_MINI, SWIFT_PRIME, SWIFT_XTRA,
};
use crate::services::{AccountService, AlertOptions, AlertService, Navigator};

/// A registration that passes every rule.
pub fn valid_state() -> FormState {
    FormState::new()
        .with(FIRST_NAME, "Amani")
        .with(LAST_NAME, "Otieno")
        .with(EMAIL, "a@b.com")
        .with(PHONE, "+254 712 345678")
        .with(ID_NUMBER, "12345678")
        .with(DRIVER_LICENSE, "DL-001")
        .with(PSV_LICENSE, "PSV-001")
        .with(PASSWORD, "secret1")
        .with(CONFIRM_PASSWORD, "secret1")
        .with(SWIFT_BODA, true)
        .with(SWIFT_MINI, true)
        .with(SWIFT_PRIME, true)
        .with(SWIFT_XTRA, true)
        .with(ACCEPT_TERMS, true)
}

/// Records alerts and navigation in call order.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<String>>,
    errors: Mutex<Vec<SubmissionError>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<SubmissionError> {
        self.errors.lock().unwrap().clone()
    }
}

impl AlertService for Recorder {
    fn success(&self, message: &str, options: AlertOptions) {
        self.events.lock().unwrap().push(format!(
            "success(keep={}): {message}",
            options.keep_after_route_change
        ));
    }

    fn error(&self, payload: &SubmissionError) {
        self.events.lock().unwrap().push(format!("error: {payload}"));
        self.errors.lock().unwrap().push(payload.clone());
    }
}

impl Navigator for Recorder {
    fn navigate(&self, route: &str) {
        self.events.lock().unwrap().push(format!("navigate: {route}"));
    }
}

/// Account service returning a fixed result.
pub struct StubAccounts {
    result: Result<(), SubmissionError>,
    submitted: Mutex<Vec<FormState>>,
}

impl StubAccounts {
    pub fn succeeding() -> Self {
        Self {
            result: Ok(()),
            submitted: Mutex::default(),
        }
    }

    pub fn failing(error: SubmissionError) -> Self {
        Self {
            result: Err(error),
            submitted: Mutex::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn last_submitted(&self) -> Option<FormState> {
        self.submitted.lock().unwrap().last().cloned()
    }
}

impl AccountService for StubAccounts {
    fn register<'a>(
        &'a self,
        fields: &'a FormState,
    ) -> BoxFuture<'a, Result<(), SubmissionError>> {
        self.submitted.lock().unwrap().push(fields.clone());
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}
