//! User directory abstraction
//!
//! The authentication layer never talks to storage directly. Whatever holds
//! user records implements [`UserDirectory`] and is handed in as a trait
//! object.

use async_trait::async_trait;

use crate::error::AuthResult;
use crate::types::{NewUser, UserRecord};

/// Lookup and insertion of user records
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by exact, case-sensitive username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<UserRecord>>;

    /// Check whether a username is taken
    async fn exists_by_username(&self, username: &str) -> AuthResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    /// Insert a new user.
    ///
    /// Must fail with [`AuthError::DuplicateUser`](crate::AuthError::DuplicateUser)
    /// when the username is already taken, even under concurrent inserts.
    async fn insert(&self, user: NewUser) -> AuthResult<UserRecord>;
}
