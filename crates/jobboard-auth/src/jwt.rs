//! JWT Token Codec
//!
//! HS256-signed, stateless identity tokens. Decoding verifies the signature
//! and claim structure only; expiry is a separate check so callers can tell
//! a tampered token from a stale one.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::{JwtConfig, MAX_TOKEN_LIFETIME};
use crate::error::{AuthError, AuthResult};
use crate::types::{Role, TokenClaims};

/// Encodes and decodes signed identity tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenCodec {
    /// Create a new codec from configuration
    pub fn new(config: &JwtConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::Config("JWT secret must be set".to_string()));
        }

        if config.token_lifetime > MAX_TOKEN_LIFETIME {
            return Err(AuthError::Config(format!(
                "Token lifetime must not exceed {} seconds",
                MAX_TOKEN_LIFETIME.as_secs()
            )));
        }
        let lifetime = Duration::from_std(config.token_lifetime)
            .map_err(|e| AuthError::Config(format!("Invalid token lifetime: {}", e)))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            lifetime,
        })
    }

    /// Configured token lifetime
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Build and sign a token for `subject` valid for the configured lifetime from `now`
    pub fn encode(&self, subject: &str, role: Role, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = TokenClaims::issue(subject, role, now, self.lifetime)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to encode token: {}", e)))
    }

    /// Verify signature and structure, returning the claims.
    ///
    /// Expiry is not checked here; see [`TokenCodec::is_expired`].
    pub fn decode(&self, token: &str) -> AuthResult<TokenClaims> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }
        claims.role()?;

        Ok(claims)
    }

    /// Whether `claims` are past their expiry at `now`
    pub fn is_expired(&self, claims: &TokenClaims, now: DateTime<Utc>) -> bool {
        now.timestamp() >= claims.exp
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
