//! Jobboard Authentication Layer
//!
//! Stateless bearer-token authentication and role/ownership authorization
//! for the job board API:
//!
//! - **Tokens**: HS256 JWTs carrying the username and role, verified on every request
//! - **Passwords**: Argon2id hashing, constant-time verification
//! - **Identity**: resolved once per request, exposed through request extensions
//!   and a task-local accessor
//! - **Gates**: pure role and ownership checks with an explicit admin bypass
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Authentication Flow                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Request → IdentityLayer → Handler → gate::require_role      │
//! │               │                          │                   │
//! │               ▼                          ▼                   │
//! │          TokenCodec               load resource              │
//! │               │                          │                   │
//! │               ▼                          ▼                   │
//! │         UserDirectory         gate::require_ownership        │
//! │               │                                              │
//! │               ▼                                              │
//! │     Identity (extension + context::current)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod context;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod types;

pub use config::AuthConfig;
pub use credentials::CredentialVerifier;
pub use directory::UserDirectory;
pub use error::{AuthError, AuthResult};
pub use gate::Access;
pub use jwt::TokenCodec;
pub use middleware::{IdentityLayer, IdentityMiddleware, IdentityResolver};
pub use password::PasswordService;
pub use types::*;

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Login and registration on top of a user directory
#[derive(Clone)]
pub struct AuthService {
    pub tokens: TokenCodec,
    pub passwords: PasswordService,
    verifier: CredentialVerifier,
    directory: Arc<dyn UserDirectory>,
}

impl AuthService {
    /// Create a new auth service with all components
    pub fn new(directory: Arc<dyn UserDirectory>, config: AuthConfig) -> AuthResult<Self> {
        let tokens = TokenCodec::new(&config.jwt)?;
        let passwords = PasswordService::new(config.password);
        let verifier = CredentialVerifier::new(directory.clone(), passwords.clone())?;

        Ok(Self {
            tokens,
            passwords,
            verifier,
            directory,
        })
    }

    /// Get the user directory
    pub fn directory(&self) -> &Arc<dyn UserDirectory> {
        &self.directory
    }

    /// Verify credentials and issue a token
    pub async fn login(&self, username: &str, secret: &str) -> AuthResult<IssuedToken> {
        let principal = self.verifier.verify(username, secret).await?;

        let token = self.tokens.encode(username, principal.role, Utc::now())?;

        info!(user_id = principal.user_id, role = %principal.role, "User logged in");

        Ok(IssuedToken { token, principal })
    }

    /// Create a user with the role named by `role`
    pub async fn register(&self, registration: Registration, role: &str) -> AuthResult<UserSummary> {
        // 1. Resolve the role before touching the directory
        let role: Role = role.parse()?;

        // 2. Reject taken usernames early
        if self.directory.exists_by_username(&registration.username).await? {
            return Err(AuthError::DuplicateUser);
        }

        // 3. Hash off the async executor
        let passwords = self.passwords.clone();
        let secret = zeroize::Zeroizing::new(registration.secret);
        let credential_hash = tokio::task::spawn_blocking(move || passwords.hash_password(&secret))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))??;

        // 4. Insert; the directory rejects a concurrent duplicate
        let record = self
            .directory
            .insert(NewUser {
                username: registration.username,
                email: registration.email,
                credential_hash,
                role,
            })
            .await?;

        info!(user_id = record.id, role = %record.role, "User registered");

        Ok(record.summary())
    }

    /// Create an identity layer for Axum router
    pub fn layer(&self) -> IdentityLayer {
        IdentityLayer::new(Arc::new(IdentityResolver::new(
            self.tokens.clone(),
            self.directory.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::testing::MemoryDirectory;
    use crate::password::test_password_config;
    use std::time::Duration;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt: config::JwtConfig {
                secret: "test-secret-key-for-jwt-tokens-min-32-bytes!".to_string(),
                token_lifetime: Duration::from_secs(900),
            },
            password: test_password_config(),
        }
    }

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryDirectory::default()), test_config()).unwrap()
    }

    fn registration(username: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            secret: "a-long-password".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let auth = service();

        for (username, role) in [("ada", Role::Admin), ("eve", Role::Employer), ("sam", Role::JobSeeker)] {
            let summary = auth.register(registration(username), role.as_str()).await.unwrap();
            assert_eq!(summary.username, username);
            assert_eq!(summary.role, role);

            let issued = auth.login(username, "a-long-password").await.unwrap();
            let claims = auth.tokens.decode(&issued.token).unwrap();

            assert_eq!(claims.sub, username);
            assert_eq!(claims.role().unwrap(), role);
            assert_eq!(issued.principal, Principal::new(summary.id, role));
            assert!(issued.bearer().starts_with("Bearer "));
        }
    }

    #[tokio::test]
    async fn test_register_accepts_any_role_case() {
        let auth = service();
        let summary = auth.register(registration("lower"), "job_seeker").await.unwrap();
        assert_eq!(summary.role, Role::JobSeeker);
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role_before_persisting() {
        let auth = service();

        let err = auth.register(registration("mallory"), "SUPERUSER").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRole(_)));

        assert!(!auth.directory().exists_by_username("mallory").await.unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let auth = service();
        auth.register(registration("taken"), "EMPLOYER").await.unwrap();

        let err = auth.register(registration("taken"), "JOB_SEEKER").await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
    }

    #[tokio::test]
    async fn test_duplicate_check_is_case_sensitive() {
        let auth = service();
        auth.register(registration("Taken"), "EMPLOYER").await.unwrap();
        assert!(auth.register(registration("taken"), "EMPLOYER").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let auth = service();
        let mut weak = registration("weak");
        weak.secret = "short".to_string();

        assert!(matches!(
            auth.register(weak, "EMPLOYER").await,
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_login_failure_is_invalid_credentials() {
        let auth = service();
        auth.register(registration("ana"), "EMPLOYER").await.unwrap();

        assert!(matches!(
            auth.login("ana", "wrong-password").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", "a-long-password").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_oversized_lifetime_fails_construction() {
        let mut config = test_config();
        config.jwt.token_lifetime = Duration::from_secs(10_000_000_000_000);

        let result = AuthService::new(Arc::new(MemoryDirectory::default()), config);
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn test_missing_secret_fails_construction() {
        let mut config = test_config();
        config.jwt.secret.clear();
        assert!(AuthService::new(Arc::new(MemoryDirectory::default()), config).is_err());
    }
}
