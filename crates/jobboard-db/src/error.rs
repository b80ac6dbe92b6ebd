//! Storage error types

use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<DbError> for jobboard_auth::AuthError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Duplicate(_) => jobboard_auth::AuthError::DuplicateUser,
            other => jobboard_auth::AuthError::Directory(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type DbResult<T> = Result<T, DbError>;
