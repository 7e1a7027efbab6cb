//! Hashed driver passwords.
//!
//! Registration stores only an Argon2id PHC string. The plaintext from the
//! form is hashed once in [`HashedPassword::new`] and dropped.

use std::fmt;

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use password_hash::rand_core::OsRng;

use crate::error::{RegisterError, Result};

/// An Argon2id password hash kept on a stored account.
///
/// `Debug` never prints the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hashes a plaintext password with a fresh salt.
    pub fn new(password: &str) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|_| RegisterError::PasswordHashError)
    }

    /// Returns whether `password` is the one this hash was made from.
    pub fn matches(&self, password: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Returns the PHC string.
    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_holds_plaintext() {
        let hash = HashedPassword::new("matatu42").unwrap();
        assert!(hash.as_phc().starts_with("$argon2id$"));
        assert!(!hash.as_phc().contains("matatu42"));
        assert_eq!(format!("{hash:?}"), "HashedPassword(..)");
    }

    #[test]
    fn test_matches() {
        let hash = HashedPassword::new("secret1").unwrap();
        assert!(hash.matches("secret1"));
        assert!(!hash.matches("secret2"));
        assert!(!hash.matches(""));
    }

    #[test]
    fn test_same_password_gets_new_salt() {
        let first = HashedPassword::new("secret1").unwrap();
        let second = HashedPassword::new("secret1").unwrap();
        assert_ne!(first, second);
        assert!(second.matches("secret1"));
    }
}
