//! Password Service
//!
//! Argon2id hashing with an optional pepper. Verification goes through the
//! PHC string, so hashes created with older cost parameters keep verifying.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};
use zeroize::Zeroizing;

use crate::config::PasswordConfig;
use crate::error::{AuthError, AuthResult};

/// Password service for hashing and verification
#[derive(Clone)]
pub struct PasswordService {
    config: PasswordConfig,
}

impl PasswordService {
    /// Create a new password service
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    /// Hash a password using Argon2id
    pub fn hash_password(&self, password: &str) -> AuthResult<String> {
        self.validate_password_strength(password)?;
        self.digest(password)
    }

    /// Hash without the strength policy; used for the verifier's decoy hash
    pub(crate) fn digest(&self, password: &str) -> AuthResult<String> {
        let peppered = self.peppered(password);
        let salt = SaltString::generate(&mut OsRng);

        let params = Params::new(
            self.config.memory_cost,
            self.config.time_cost,
            self.config.parallelism,
            Some(self.config.hash_length as usize),
        )
        .map_err(|e| AuthError::Internal(format!("Invalid Argon2 params: {}", e)))?;

        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

        let hash = argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashingFailed)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a hash in constant time
    pub fn verify_password(&self, password: &str, hash: &str) -> AuthResult<bool> {
        let peppered = self.peppered(password);

        let parsed_hash = PasswordHash::new(hash)?;

        match Argon2::default().verify_password(peppered.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::PasswordVerificationFailed),
        }
    }

    /// Validate password strength
    pub fn validate_password_strength(&self, password: &str) -> AuthResult<()> {
        let mut errors = Vec::new();

        if password.trim().is_empty() {
            errors.push("Password must not be blank".to_string());
        }

        let length = password.chars().count();
        if length < self.config.min_password_length {
            errors.push(format!(
                "Password must be at least {} characters",
                self.config.min_password_length
            ));
        }
        if length > self.config.max_password_length {
            errors.push(format!(
                "Password must be at most {} characters",
                self.config.max_password_length
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AuthError::WeakPassword(errors.join("; ")))
        }
    }

    fn peppered(&self, password: &str) -> Zeroizing<String> {
        match self.config.pepper {
            Some(ref pepper) => Zeroizing::new(format!("{}{}", password, pepper)),
            None => Zeroizing::new(password.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_password_config() -> PasswordConfig {
    PasswordConfig {
        // Use lower values for tests to be fast
        memory_cost: 4096,
        time_cost: 1,
        parallelism: 1,
        hash_length: 32,
        pepper: None,
        min_password_length: 8,
        max_password_length: 128,
    }
}
