//! Application state shared across handlers

use std::sync::Arc;

use jobboard_auth::{AuthConfig, AuthResult, AuthService};
use jobboard_db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Repositories
    pub db: Arc<Database>,
    /// Authentication service
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Fresh in-memory stores with the user repository as the auth directory
    pub fn in_memory(config: AuthConfig) -> AuthResult<Self> {
        let db = Arc::new(Database::new());
        let auth = Arc::new(AuthService::new(Arc::new(db.user_repo()), config)?);
        Ok(Self::new(db, auth))
    }
}
