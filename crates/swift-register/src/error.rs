//! Error types for registration.

use swift_forms::{FormError, SubmissionError};
use thiserror::Error;

/// Registration-specific errors.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Form data error.
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// An account with this email already exists.
    #[error("Email \"{0}\" is already registered")]
    EmailTaken(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHashError,

    /// IO error (reading config or input files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RegisterError> for SubmissionError {
    fn from(err: RegisterError) -> Self {
        Self::Message(err.to_string())
    }
}

/// Result type alias for registration operations.
pub type Result<T> = std::result::Result<T, RegisterError>;
