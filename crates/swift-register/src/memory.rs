//! In-memory account service.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;
use swift_forms::{Form, FormState, SubmissionError};
use tracing::{debug, info};

use crate::error::{RegisterError, Result};
use crate::password::HashedPassword;
use crate::registration::{DriverCategory, DriverRegistration};
use crate::services::AccountService;

/// An account created through registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub id_number: String,
    pub driver_license: String,
    pub psv_license: String,
    pub password_hash: HashedPassword,
    pub categories: Vec<DriverCategory>,
    /// Whether the email address has been verified.
    pub verified: bool,
}

impl StoredAccount {
    /// Checks a password against the stored hash.
    pub fn check_password(&self, password: &str) -> bool {
        self.password_hash.matches(password)
    }
}

/// Account service keeping accounts in memory, keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryAccountService {
    accounts: Mutex<HashMap<String, StoredAccount>>,
}

impl InMemoryAccountService {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<String, StoredAccount>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an account, rejecting duplicate emails.
    pub fn create(&self, registration: &DriverRegistration) -> Result<StoredAccount> {
        let key = registration.email.trim().to_lowercase();
        if self.accounts().contains_key(&key) {
            debug!(email = %key, "duplicate registration rejected");
            return Err(RegisterError::EmailTaken(registration.email.clone()));
        }

        let password_hash = HashedPassword::new(&registration.password)?;
        let phone = Some(registration.phone.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let account = StoredAccount {
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            email: registration.email.clone(),
            phone,
            id_number: registration.id_number.clone(),
            driver_license: registration.driver_license.clone(),
            psv_license: registration.psv_license.clone(),
            password_hash,
            categories: registration.selected_categories(),
            verified: false,
        };

        let mut accounts = self.accounts();
        if accounts.contains_key(&key) {
            return Err(RegisterError::EmailTaken(registration.email.clone()));
        }
        accounts.insert(key, account.clone());
        info!(email = %account.email, "account registered, awaiting verification");
        Ok(account)
    }

    /// Returns the account registered under an email.
    pub fn get(&self, email: &str) -> Option<StoredAccount> {
        self.accounts().get(&email.trim().to_lowercase()).cloned()
    }

    /// Returns the number of accounts.
    pub fn len(&self) -> usize {
        self.accounts().len()
    }

    /// Returns whether no account exists.
    pub fn is_empty(&self) -> bool {
        self.accounts().is_empty()
    }
}

impl AccountService for InMemoryAccountService {
    fn register<'a>(
        &'a self,
        fields: &'a FormState,
    ) -> BoxFuture<'a, std::result::Result<(), SubmissionError>> {
        Box::pin(async move {
            let registration =
                DriverRegistration::from_state(fields).map_err(RegisterError::from)?;
            self.create(&registration)?;
            Ok::<(), SubmissionError>(())
        })
    }
}
