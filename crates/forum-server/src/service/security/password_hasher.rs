//! Argon2id password hashing and verification.
//!
//! Hashing and verification return handler errors directly, so registration and
//! login can propagate them with `?`.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

use crate::handler::{ErrorKind, Result};

/// Tracing target for password hashing.
const TRACING_TARGET: &str = "forum_server::service::password_hasher";

/// Password used to build the hash checked by [`PasswordHasher::verify_dummy_password`].
const DUMMY_PASSWORD: &str = "forum-dummy-password";

/// Argon2id hashing service.
///
/// Cloning is cheap: the precomputed dummy hash is shared.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Creates a new hasher with default Argon2id parameters.
    pub fn new() -> crate::Result<Self> {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(DUMMY_PASSWORD.as_bytes(), &salt)
            .map_err(|e| {
                crate::Error::internal("password_hasher", "failed to prepare dummy hash")
                    .with_source(e)
            })?
            .to_string();

        Ok(Self {
            argon2,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Hashes a password with a fresh random salt into a PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing operation failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_context("Hash generation error")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC string.
    ///
    /// A wrong password yields [`ErrorKind::Unauthorized`]; a corrupt stored hash
    /// yields [`ErrorKind::InternalServerError`].
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "stored password hash is malformed"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication temporarily unavailable")
                .with_context("Hash format error")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => {
                tracing::debug!(target: TRACING_TARGET, "password verified");
                Ok(())
            }
            Err(ArgonError::Password) => {
                tracing::debug!(target: TRACING_TARGET, "password mismatch");
                Err(ErrorKind::Unauthorized
                    .with_message("Invalid email or password")
                    .with_resource("authentication"))
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification failed"
                );

                Err(ErrorKind::InternalServerError
                    .with_message("Authentication temporarily unavailable")
                    .with_context("Verification error")
                    .with_resource("authentication"))
            }
        }
    }

    /// Runs a full verification against a dummy hash and discards the result.
    ///
    /// Login calls this for unknown emails so both branches cost one Argon2 run.
    pub fn verify_dummy_password(&self, password: &str) {
        if let Ok(parsed_hash) = PasswordHash::new(&self.dummy_hash) {
            let _ = self
                .argon2
                .verify_password(password.as_bytes(), &parsed_hash);
        }
    }
}
