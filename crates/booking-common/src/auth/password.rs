//! Password hashing and verification utilities
//!
//! Uses Argon2id with a configurable cost. The same salted hash protects
//! refresh token secrets at rest.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use super::refresh_token::generate_refresh_secret;
use crate::config::PasswordConfig;
use crate::error::AppError;

/// Password service for dependency injection
#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
    /// Hash of a random secret, verified when there is no real hash to check
    decoy_hash: String,
}

impl PasswordService {
    /// Create a password service with the configured Argon2 cost
    ///
    /// # Errors
    /// Returns a configuration error if argon2 rejects the parameters
    pub fn new(config: &PasswordConfig) -> Result<Self, AppError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AppError::Config(format!("Invalid password hash parameters: {e}")))?;
        let mut service = Self {
            params,
            decoy_hash: String::new(),
        };
        service.decoy_hash = service.hash(&generate_refresh_secret())?;
        Ok(service)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a secret with a fresh random salt
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
    }

    /// Verify a secret against a hash
    ///
    /// The cost parameters are read from the hash itself, so hashes written
    /// under a previous configuration keep verifying.
    ///
    /// # Errors
    /// Returns an error if the hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Spend the same Argon2 work as [`Self::verify`] when no account matched
    ///
    /// Always `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        self.verify(password, &self.decoy_hash).unwrap_or(false)
    }

    /// Verify a password and return an error if invalid
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if self.verify(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}
