//! Password hashing and verification using Argon2id.
//!
//! Account passwords are stored as PHC strings. Verification goes through the
//! argon2 verifier, which compares in constant time.

use std::sync::LazyLock;

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::Rng;
use rand::rngs::OsRng;

use crate::handler::{ErrorKind, Result};

/// Tracing target for password hashing.
const TRACING_TARGET: &str = "posconf_server::service::password_hasher";

/// Argon2id hashing and verification service.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new instance of the [`PasswordHasher`] service.
    pub fn new() -> Self {
        let argon2 = Argon2::default();
        Self { argon2 }
    }

    /// Hashes a password using Argon2id with a random salt.
    ///
    /// The returned PHC string carries the parameters and the salt and can be
    /// stored as is.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InternalServerError` if salt generation or hashing
    /// fails.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::try_from_rng(&mut OsRng).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to generate salt"
            );

            ErrorKind::InternalServerError
                .with_context("Salt generation error")
                .with_resource("authentication")
        })?;

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing failed"
                );

                ErrorKind::InternalServerError
                    .with_context("Hash generation error")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::InvalidCredentials` for a wrong password
    /// - `ErrorKind::InternalServerError` for an unreadable stored hash
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "stored password hash is not a valid PHC string"
            );

            ErrorKind::InternalServerError
                .with_context("Hash format error")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => {
                tracing::debug!(target: TRACING_TARGET, "password mismatch");
                Err(ErrorKind::InvalidCredentials.into_error())
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification failed"
                );

                Err(ErrorKind::InternalServerError
                    .with_context("Verification error")
                    .with_resource("authentication"))
            }
        }
    }

    /// Verifies `password` against a hash no account can match.
    ///
    /// Used when the account does not exist so that a failed login costs one
    /// Argon2 verification whether or not the username is known. Always
    /// returns `false`.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        if let Some(dummy_hash) = dummy_hash() {
            let _ = self.verify_password(password, dummy_hash);
        }

        false
    }
}

/// PHC string of a random password, hashed once per process.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let password_len = rand::random_range(16..32);
    let dummy_password: String = (0..password_len)
        .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
        .collect();

    PasswordHasher::new().hash_password(&dummy_password).ok()
});

/// Returns the process-wide dummy hash, or `None` if hashing failed.
fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH.as_deref()
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("s3cret-till")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("s3cret-till", &hash).is_ok());

        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash1 = hasher.hash_password("counter")?;
        let hash2 = hasher.hash_password("counter")?;

        assert_ne!(hash1, hash2);
        assert!(hasher.verify_password("counter", &hash1).is_ok());
        assert!(hasher.verify_password("counter", &hash2).is_ok());

        Ok(())
    }

    #[test]
    fn wrong_password_is_invalid_credentials() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct")?;

        let error = hasher
            .verify_password("incorrect", &hash)
            .expect_err("wrong password must not verify");
        assert_eq!(error.kind(), ErrorKind::InvalidCredentials);

        Ok(())
    }

    #[test]
    fn plaintext_stored_value_is_internal_error() {
        let hasher = PasswordHasher::new();
        let error = hasher
            .verify_password("password", "password")
            .expect_err("plaintext is not a PHC string");
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn dummy_verification_never_succeeds() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_dummy_password("anything"));
        assert!(!hasher.verify_dummy_password(""));
    }

    #[test]
    fn dummy_hash_is_computed_once() {
        let hasher = PasswordHasher::new();
        let first = dummy_hash().map(str::as_ptr);
        hasher.verify_dummy_password("first attempt");
        hasher.verify_dummy_password("second attempt");
        let second = dummy_hash().map(str::as_ptr);

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn dummy_hash_uses_the_same_parameters_as_stored_hashes() -> anyhow::Result<()> {
        let stored = PasswordHasher::new().hash_password("correct-horse")?;
        let dummy = dummy_hash().ok_or_else(|| anyhow::anyhow!("dummy hash missing"))?;

        let stored = PasswordHash::new(&stored).map_err(|e| anyhow::anyhow!("{e}"))?;
        let dummy = PasswordHash::new(dummy).map_err(|e| anyhow::anyhow!("{e}"))?;
        assert_eq!(stored.algorithm, dummy.algorithm);
        assert_eq!(stored.params, dummy.params);
        Ok(())
    }
}
