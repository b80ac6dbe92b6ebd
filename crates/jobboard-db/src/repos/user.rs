//! User repository

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jobboard_auth::{AuthResult, NewUser, Role, UserDirectory, UserId, UserRecord};
use tracing::debug;

use crate::{DbError, DbResult};

/// User repository backing authentication and the admin user listing
#[derive(Clone, Default)]
pub struct UserRepo {
    users: Arc<DashMap<UserId, UserRecord>>,
    by_username: Arc<DashMap<String, UserId>>,
    seq: Arc<AtomicI64>,
}

impl UserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new user, failing if the username is taken
    pub fn create(&self, user: NewUser) -> DbResult<UserRecord> {
        // The index entry stays locked until the record is in place, so two
        // concurrent creates for one username cannot both pass.
        match self.by_username.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(DbError::Duplicate(format!(
                "Username {} already exists",
                user.username
            ))),
            Entry::Vacant(slot) => {
                let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
                let record = UserRecord {
                    id,
                    username: user.username,
                    email: user.email,
                    credential_hash: user.credential_hash,
                    role: user.role,
                };
                self.users.insert(id, record.clone());
                slot.insert(id);

                debug!(user_id = id, role = %record.role, "User stored");
                Ok(record)
            }
        }
    }

    /// Find user by ID
    pub fn find_by_id(&self, id: UserId) -> Option<UserRecord> {
        self.users.get(&id).map(|r| r.value().clone())
    }

    /// Find user by exact username
    pub fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        let id = *self.by_username.get(username)?;
        self.find_by_id(id)
    }

    /// All users holding `role`, ordered by id
    pub fn list_by_role(&self, role: Role) -> Vec<UserRecord> {
        let mut users: Vec<UserRecord> = self
            .users
            .iter()
            .filter(|r| r.role == role)
            .map(|r| r.value().clone())
            .collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Change a user's stored role
    pub fn update_role(&self, id: UserId, role: Role) -> DbResult<UserRecord> {
        let mut record = self
            .users
            .get_mut(&id)
            .ok_or_else(|| DbError::NotFound(format!("User {}", id)))?;
        record.role = role;
        Ok(record.clone())
    }

    /// Remove a user; tokens issued to them stop resolving
    pub fn delete(&self, id: UserId) -> bool {
        match self.users.remove(&id) {
            Some((_, record)) => {
                self.by_username.remove(&record.username);
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserDirectory for UserRepo {
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<UserRecord>> {
        Ok(UserRepo::find_by_username(self, username))
    }

    async fn insert(&self, user: NewUser) -> AuthResult<UserRecord> {
        Ok(self.create(user)?)
    }
}
