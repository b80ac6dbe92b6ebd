//! User listing DTOs

use jobboard_auth::{UserId, UserRecord};
use serde::{Deserialize, Serialize};

/// One entry of the admin user listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListItem {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<UserRecord> for UserListItem {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}
