//! Credential verification
//!
//! Resolves a username and plaintext secret to a [`Principal`]. Unknown users
//! and wrong passwords produce the same error and cost one hash verification
//! each, so neither the response nor its timing reveals which usernames exist.

use std::sync::Arc;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::directory::UserDirectory;
use crate::error::{AuthError, AuthResult};
use crate::password::PasswordService;
use crate::types::Principal;

/// Checks submitted credentials against the user directory
#[derive(Clone)]
pub struct CredentialVerifier {
    directory: Arc<dyn UserDirectory>,
    passwords: PasswordService,
    /// Verified against when the username is unknown
    decoy_hash: Arc<str>,
}

impl CredentialVerifier {
    /// Create a verifier, hashing the decoy credential up front.
    ///
    /// This runs one Argon2 hash on the calling thread; construct verifiers
    /// at startup, not per request.
    pub fn new(directory: Arc<dyn UserDirectory>, passwords: PasswordService) -> AuthResult<Self> {
        let decoy_hash = passwords.digest("decoy-credential-never-matches")?;

        Ok(Self {
            directory,
            passwords,
            decoy_hash: decoy_hash.into(),
        })
    }

    /// Verify `username`/`secret`, returning the stored identity on success
    pub async fn verify(&self, username: &str, secret: &str) -> AuthResult<Principal> {
        let record = self.directory.find_by_username(username).await?;

        let (hash, principal) = match record {
            Some(record) => {
                let principal = Principal::new(record.id, record.role);
                (record.credential_hash, Some(principal))
            }
            None => (self.decoy_hash.to_string(), None),
        };

        let matched = self.check(secret, hash).await?;

        match principal {
            Some(principal) if matched => Ok(principal),
            Some(_) => {
                debug!(username = %username, "Password mismatch");
                Err(AuthError::InvalidCredentials)
            }
            None => {
                debug!(username = %username, "Unknown username");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Run the hash comparison off the async executor
    async fn check(&self, secret: &str, hash: String) -> AuthResult<bool> {
        let passwords = self.passwords.clone();
        let secret = Zeroizing::new(secret.to_string());

        let outcome = tokio::task::spawn_blocking(move || passwords.verify_password(&secret, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password check task failed: {}", e)))?;

        match outcome {
            Ok(matched) => Ok(matched),
            Err(AuthError::PasswordVerificationFailed) => {
                warn!("Stored credential hash could not be parsed");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::testing::MemoryDirectory;
    use crate::password::test_password_config;
    use crate::types::Role;

    async fn verifier_with_alice() -> CredentialVerifier {
        let passwords = PasswordService::new(test_password_config());
        let hash = passwords.hash_password("alice-password").unwrap();

        let directory = MemoryDirectory::default();
        directory.seed(1, "alice", &hash, Role::JobSeeker).await;

        CredentialVerifier::new(Arc::new(directory), passwords).unwrap()
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let verifier = verifier_with_alice().await;
        let principal = verifier.verify("alice", "alice-password").await.unwrap();
        assert_eq!(principal, Principal::new(1, Role::JobSeeker));
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let verifier = verifier_with_alice().await;

        let unknown = verifier.verify("mallory", "alice-password").await.unwrap_err();
        let wrong = verifier.verify("alice", "not-her-password").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.error_code(), wrong.error_code());
        assert_eq!(unknown.status_code(), wrong.status_code());
    }

    #[test]
    fn test_decoy_hash_is_ready_after_construction() {
        let passwords = PasswordService::new(test_password_config());
        let verifier =
            CredentialVerifier::new(Arc::new(MemoryDirectory::default()), passwords.clone()).unwrap();

        assert!(verifier.decoy_hash.starts_with("$argon2id$"));
        assert!(!passwords
            .verify_password("decoy-credential", &verifier.decoy_hash)
            .unwrap());
    }

    #[test]
    fn test_unusable_hash_params_fail_construction() {
        let mut config = test_password_config();
        config.memory_cost = 0;

        let result =
            CredentialVerifier::new(Arc::new(MemoryDirectory::default()), PasswordService::new(config));
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_username_is_case_sensitive() {
        let verifier = verifier_with_alice().await;
        assert!(matches!(
            verifier.verify("Alice", "alice-password").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_a_credential_failure() {
        let directory = MemoryDirectory::default();
        directory.seed(4, "dave", "garbage", Role::Employer).await;
        let verifier =
            CredentialVerifier::new(Arc::new(directory), PasswordService::new(test_password_config()))
                .unwrap();

        assert!(matches!(
            verifier.verify("dave", "whatever-password").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
