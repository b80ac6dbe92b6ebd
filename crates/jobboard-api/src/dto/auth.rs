//! Authentication DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::{require_not_blank, RequestBody};

// =============================================================================
// Signup
// =============================================================================

/// Signup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, message = "username should be at least 2 characters long"))]
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RequestBody for SignupRequest {
    fn check(&self) -> ApiResult<()> {
        require_not_blank("username", &self.username)?;
        require_not_blank("email", &self.email)?;
        require_not_blank("password", &self.password)
    }
}

/// `?role=` query parameter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleQuery {
    #[serde(default)]
    pub role: Option<String>,
}

// =============================================================================
// Login
// =============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl RequestBody for LoginRequest {
    fn check(&self) -> ApiResult<()> {
        require_not_blank("username", &self.username)?;
        require_not_blank("password", &self.password)
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
