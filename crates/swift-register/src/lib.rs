//! # swift-register
//!
//! Driver registration form for Swift Ride, built on `swift-forms`.
//!
//! This crate provides:
//! - The fixed registration rule set and its messages
//! - A typed [`DriverRegistration`] record
//! - Collaborator traits for accounts, alerts and navigation
//! - [`RegisterPage`], wiring the form to those collaborators
//! - An in-memory account service with Argon2 password hashing
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use swift_register::{
//!     InMemoryAccountService, RegisterConfig, RegisterPage, TracingAlerts,
//!     TracingNavigator,
//! };
//! use swift_register::schema::{messages, EMAIL};
//!
//! let mut page = RegisterPage::new(
//!     RegisterConfig::default(),
//!     Arc::new(InMemoryAccountService::new()),
//!     Arc::new(TracingAlerts),
//!     Arc::new(TracingNavigator),
//! );
//!
//! page.set_value(EMAIL, "not-an-email");
//! page.blur(EMAIL);
//! assert_eq!(page.visible_error(EMAIL), Some(messages::EMAIL_INVALID));
//! ```
//!
//! ## Driver categories
//!
//! The four category checkboxes are validated according to
//! [`CategoryRule`]. The default, [`CategoryRule::EachRequired`], demands
//! every category even though the message reads "Select one of the driver
//! options"; [`CategoryRule::AtLeastOne`] accepts any single selection.

pub mod config;
mod error;
pub mod memory;
mod page;
pub mod password;
mod registration;
pub mod schema;
pub mod services;

#[cfg(test)]
mod testing;

pub use config::{CategoryRule, RegisterConfig};
pub use error::{RegisterError, Result};
pub use memory::{InMemoryAccountService, StoredAccount};
pub use page::RegisterPage;
pub use registration::{DriverCategory, DriverRegistration};
pub use services::{
    AccountService, AlertOptions, AlertService, Navigator, TracingAlerts, TracingNavigator,
};
