//! Core authentication types
//!
//! Shared types used across all authentication components.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AuthError;

/// Numeric user identifier as stored by the user directory
pub type UserId = i64;

// =============================================================================
// Roles
// =============================================================================

/// User roles
///
/// Roles are disjoint capability sets, not a hierarchy. An `Admin` only
/// reaches an operation when that operation lists `Admin` explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform administrator
    Admin,
    /// Posts and manages jobs
    Employer,
    /// Applies to jobs
    JobSeeker,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 3] = [Role::Admin, Role::Employer, Role::JobSeeker];

    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Employer => "EMPLOYER",
            Self::JobSeeker => "JOB_SEEKER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only place a role string is turned into a [`Role`].
///
/// Matching is case-insensitive but otherwise exact: `employer` and
/// `Employer` are accepted, ` EMPLOYER ` is not.
impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AuthError::InvalidRole(s.to_string()))
    }
}

// =============================================================================
// Request Identity
// =============================================================================

/// The authenticated identity attached to a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User ID
    pub user_id: UserId,
    /// Role as stored in the user directory when the request was resolved
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Check if the principal is an admin
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Outcome of identity resolution for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identity {
    /// No usable credentials were presented
    #[default]
    Anonymous,
    /// A valid, unexpired token resolved to an existing user
    Authenticated(Principal),
}

impl Identity {
    /// The principal, if the request is authenticated
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            Self::Anonymous => None,
        }
    }
}

impl From<Principal> for Identity {
    fn from(principal: Principal) -> Self {
        Self::Authenticated(principal)
    }
}

// =============================================================================
// Token Types
// =============================================================================

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Granted role names
    pub authorities: Vec<String>,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for `subject` valid for `lifetime` starting at `now`.
    ///
    /// Fails instead of wrapping when `now + lifetime` is not a representable time.
    pub fn issue(
        subject: &str,
        role: Role,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, AuthError> {
        let expires = now.checked_add_signed(lifetime).ok_or_else(|| {
            AuthError::Config(format!("Token lifetime of {}s overflows the expiry", lifetime.num_seconds()))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            authorities: vec![role.as_str().to_string()],
            iat: now.timestamp(),
            exp: expires.timestamp(),
        })
    }

    /// The role carried by the token.
    ///
    /// This is a cached copy from issue time; the identity layer always
    /// prefers the role currently stored for the user.
    pub fn role(&self) -> Result<Role, AuthError> {
        self.authorities
            .first()
            .ok_or(AuthError::InvalidToken)?
            .parse()
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// A freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact signed token
    pub token: String,
    /// Identity the token was issued for
    pub principal: Principal,
}

impl IssuedToken {
    /// Value for an `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// =============================================================================
// User Directory Types
// =============================================================================

/// A stored user as seen by the authentication layer
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// PHC-formatted password hash; never serialized
    pub credential_hash: String,
    pub role: Role,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("credential_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl UserRecord {
    /// Drop the credential hash, keeping the public fields
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// A user about to be inserted into the directory
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub credential_hash: String,
    pub role: Role,
}

/// Public view of a user returned after registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Signup input
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("EMPLOYER".parse::<Role>().unwrap(), Role::Employer);
        assert_eq!("employer".parse::<Role>().unwrap(), Role::Employer);
        assert_eq!("Job_Seeker".parse::<Role>().unwrap(), Role::JobSeeker);
    }

    #[test]
    fn test_role_parsing_does_not_trim() {
        for input in [" admin ", "EMPLOYER ", "\tJOB_SEEKER"] {
            let err = input.parse::<Role>().unwrap_err();
            assert!(matches!(err, AuthError::InvalidRole(ref s) if s == input));
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "RECRUITER".parse::<Role>().unwrap_err();
        assert!(matches!(err, AuthError::InvalidRole(ref s) if s == "RECRUITER"));
        assert!("".parse::<Role>().is_err());
        assert!("JOBSEEKER".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display_round_trips() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Role::JobSeeker).unwrap(), "\"JOB_SEEKER\"");
        let role: Role = serde_json::from_str("\"EMPLOYER\"").unwrap();
        assert_eq!(role, Role::Employer);
    }

    #[test]
    fn test_identity_accessors() {
        let principal = Principal::new(7, Role::Employer);
        let identity = Identity::from(principal);
        assert_eq!(identity.principal(), Some(&principal));

        assert_eq!(Identity::Anonymous.principal(), None);
        assert_eq!(Identity::default(), Identity::Anonymous);
    }

    #[test]
    fn test_claims_role() {
        let claims =
            TokenClaims::issue("alice", Role::JobSeeker, Utc::now(), Duration::hours(1)).unwrap();
        assert_eq!(claims.role().unwrap(), Role::JobSeeker);
        assert_eq!(claims.exp - claims.iat, 3600);

        let empty = TokenClaims { authorities: vec![], ..claims };
        assert!(empty.role().is_err());
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let lifetime = Duration::seconds(10_000_000_000_000);
        let err = TokenClaims::issue("alice", Role::Admin, Utc::now(), lifetime).unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));

        let near_end = DateTime::<Utc>::MAX_UTC - Duration::minutes(1);
        assert!(TokenClaims::issue("alice", Role::Admin, near_end, Duration::hours(1)).is_err());
    }

    #[test]
    fn test_user_record_debug_redacts_hash() {
        let record = UserRecord {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            credential_hash: "$argon2id$v=19$secret".to_string(),
            role: Role::Admin,
        };
        let debug = format!("{:?}", record);
        assert!(!debug.contains("argon2id"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_summary_omits_hash() {
        let record = UserRecord {
            id: 3,
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            credential_hash: "hash".to_string(),
            role: Role::Employer,
        };
        let json = serde_json::to_value(record.summary()).unwrap();
        assert_eq!(json["role"], "EMPLOYER");
        assert!(json.get("credential_hash").is_none());
    }
}
