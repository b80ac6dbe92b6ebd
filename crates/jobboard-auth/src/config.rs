//! Authentication configuration
//!
//! Centralized configuration for all authentication components with
//! secure defaults following OWASP recommendations.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Longest token lifetime accepted by configuration (one year)
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Main authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,
    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

/// JWT token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens (should be at least 256 bits)
    pub secret: String,
    /// How long an issued token stays valid
    #[serde(with = "humantime_serde")]
    pub token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // Must be set in production
            token_lifetime: Duration::from_secs(60 * 60), // 1 hour
        }
    }
}

/// Password hashing configuration (Argon2id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// Memory cost in KiB (OWASP recommends 19456 KiB = 19 MiB minimum)
    pub memory_cost: u32,
    /// Time cost (iterations) - OWASP recommends 2 minimum
    pub time_cost: u32,
    /// Parallelism factor
    pub parallelism: u32,
    /// Output hash length in bytes
    pub hash_length: u32,
    /// Pepper (additional secret, optional)
    pub pepper: Option<String>,
    /// Minimum password length
    pub min_password_length: usize,
    /// Maximum password length (to prevent DoS)
    pub max_password_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            // OWASP recommended values for Argon2id
            memory_cost: 19456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
            hash_length: 32,
            pepper: None,
            min_password_length: 8,
            max_password_length: 128,
        }
    }
}

impl AuthConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> AuthResult<Self> {
        let mut config = Self::default();

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.jwt.secret = secret;
        }
        if let Ok(lifetime) = std::env::var("JWT_TOKEN_LIFETIME_SECS") {
            let secs = lifetime
                .parse::<u64>()
                .map_err(|e| AuthError::Config(format!("JWT_TOKEN_LIFETIME_SECS: {}", e)))?;
            config.jwt.token_lifetime = Duration::from_secs(secs);
        }

        if let Ok(pepper) = std::env::var("PASSWORD_PEPPER") {
            config.password.pepper = Some(pepper);
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        // JWT validation
        if self.jwt.secret.is_empty() {
            errors.push("JWT secret must be set".to_string());
        } else if self.jwt.secret.len() < 32 {
            errors.push("JWT secret should be at least 256 bits (32 bytes)".to_string());
        }
        if self.jwt.token_lifetime.is_zero() {
            errors.push("JWT token lifetime must be greater than zero".to_string());
        } else if self.jwt.token_lifetime > MAX_TOKEN_LIFETIME {
            errors.push(format!(
                "JWT token lifetime must not exceed {} seconds",
                MAX_TOKEN_LIFETIME.as_secs()
            ));
        }

        // Password validation
        if self.password.memory_cost < 19456 {
            errors.push("Argon2 memory cost should be at least 19456 KiB (OWASP recommendation)".to_string());
        }
        if self.password.time_cost < 2 {
            errors.push("Argon2 time cost should be at least 2 (OWASP recommendation)".to_string());
        }
        if self.password.min_password_length > self.password.max_password_length {
            errors.push("Minimum password length exceeds the maximum".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt.token_lifetime, Duration::from_secs(3600));
        assert_eq!(config.password.memory_cost, 19456);
        assert!(config.password.pepper.is_none());
    }

    #[test]
    fn test_config_validation_missing_secret() {
        let config = AuthConfig::default();
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("must be set")));
    }

    #[test]
    fn test_config_validation_short_secret() {
        let mut config = AuthConfig::default();
        config.jwt.secret = "too-short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_lifetime() {
        let mut config = AuthConfig::default();
        config.jwt.secret = "a".repeat(32);
        config.jwt.token_lifetime = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_excessive_lifetime() {
        let mut config = AuthConfig::default();
        config.jwt.secret = "a".repeat(32);

        config.jwt.token_lifetime = MAX_TOKEN_LIFETIME;
        assert!(config.validate().is_ok());

        config.jwt.token_lifetime = Duration::from_secs(10_000_000_000_000);
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("must not exceed")));
    }

    #[test]
    fn test_config_validation_valid() {
        let mut config = AuthConfig::default();
        config.jwt.secret = "a".repeat(32); // 32 bytes
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lifetime_deserializes_from_humantime() {
        let config: JwtConfig =
            serde_json::from_str(r#"{"secret":"s","token_lifetime":"30m"}"#).unwrap();
        assert_eq!(config.token_lifetime, Duration::from_secs(30 * 60));
    }
}
