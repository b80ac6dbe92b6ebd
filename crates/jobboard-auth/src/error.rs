//! Authentication error types
//!
//! Errors are designed to be:
//! - Informative for logging/debugging
//! - Safe for external exposure (no sensitive data leakage)
//! - Convertible to HTTP status codes

use thiserror::Error;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    // =========================================================================
    // Token Errors
    // =========================================================================
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// Token is invalid (malformed, wrong signature, missing claims)
    #[error("Invalid token")]
    InvalidToken,

    // =========================================================================
    // Credential Errors
    // =========================================================================
    /// Unknown username or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    // =========================================================================
    // Password Errors
    // =========================================================================
    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Password hash verification failed
    #[error("Password verification failed")]
    PasswordVerificationFailed,

    /// Password hashing failed
    #[error("Password hashing failed")]
    PasswordHashingFailed,

    // =========================================================================
    // Registration Errors
    // =========================================================================
    /// Username is already taken
    #[error("User already exists")]
    DuplicateUser,

    /// Role string is not one of the known roles
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // =========================================================================
    // Permission Errors
    // =========================================================================
    /// Caller is anonymous
    #[error("Authentication required")]
    Unauthenticated,

    /// Caller's role is not allowed for this operation
    #[error("Access denied")]
    Forbidden,

    /// Resource exists but belongs to someone else
    #[error("Resource does not belong to the caller")]
    NotOwner,

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// User directory failure
    #[error("Directory error: {0}")]
    Directory(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not be exposed to clients)
    #[error("Internal error")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::WeakPassword(_) | Self::InvalidRole(_) => 400,

            // 401 Unauthorized
            Self::TokenExpired
            | Self::InvalidToken
            | Self::InvalidCredentials
            | Self::PasswordVerificationFailed
            | Self::Unauthenticated => 401,

            // 403 Forbidden
            Self::Forbidden | Self::NotOwner => 403,

            // 409 Conflict
            Self::DuplicateUser => 409,

            // 500 Internal Server Error
            Self::PasswordHashingFailed
            | Self::Directory(_)
            | Self::Config(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Get an error code for the client (safe to expose)
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::PasswordVerificationFailed => "INVALID_CREDENTIALS",
            Self::PasswordHashingFailed => "INTERNAL_ERROR",
            Self::DuplicateUser => "DUPLICATE_USER",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotOwner => "NOT_OWNER",
            Self::Directory(_) => "INTERNAL_ERROR",
            Self::Config(_) => "INTERNAL_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Get safe message for client (doesn't leak internal details)
    pub fn client_message(&self) -> String {
        match self {
            Self::Directory(_) | Self::Internal(_) | Self::Config(_) => {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(_: argon2::password_hash::Error) -> Self {
        Self::PasswordVerificationFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::Unauthenticated.status_code(), 401);
        assert_eq!(AuthError::Forbidden.status_code(), 403);
        assert_eq!(AuthError::NotOwner.status_code(), 403);
        assert_eq!(AuthError::DuplicateUser.status_code(), 409);
        assert_eq!(AuthError::InvalidRole("x".to_string()).status_code(), 400);
        assert_eq!(AuthError::Directory("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(AuthError::NotOwner.error_code(), "NOT_OWNER");
        assert_eq!(
            AuthError::Directory("secret info".to_string()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_client_message_hides_internal_details() {
        let err = AuthError::Directory("connection string with password".to_string());
        assert!(!err.client_message().contains("password"));
        assert_eq!(err.client_message(), "An internal error occurred");
    }

    #[test]
    fn test_invalid_role_message_names_input() {
        let err = AuthError::InvalidRole("RECRUITER".to_string());
        assert_eq!(err.client_message(), "Invalid role: RECRUITER");
    }
}
