//! API error handling
//!
//! Every failure leaves the API as a JSON body of the form
//! `{"code": ..., "message": ..., "timeStamp": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use jobboard_auth::{context, AuthError};
use jobboard_db::DbError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("{0}")]
    Unauthorized(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    // =========================================================================
    // Request Errors
    // =========================================================================
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    // =========================================================================
    // Resource Errors
    // =========================================================================
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("An internal error occurred")]
    Internal(String),
}

impl ApiError {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ValidationError(_) | Self::MissingParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// When the error was produced
    pub time_stamp: DateTime<Utc>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            time_stamp: Utc::now(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Self::Internal(detail) = &self {
            let user_id = context::current().principal().map(|p| p.user_id);
            tracing::error!(?user_id, detail = %detail, "Request failed");
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::PasswordVerificationFailed => {
                Self::InvalidCredentials
            }
            AuthError::Unauthenticated | AuthError::TokenExpired | AuthError::InvalidToken => {
                Self::Unauthorized("Authentication required".to_string())
            }
            AuthError::Forbidden | AuthError::NotOwner => Self::Forbidden(err.client_message()),
            AuthError::DuplicateUser => Self::Conflict(err.client_message()),
            AuthError::InvalidRole(_) | AuthError::WeakPassword(_) => {
                Self::BadRequest(err.client_message())
            }
            AuthError::PasswordHashingFailed
            | AuthError::Directory(_)
            | AuthError::Config(_)
            | AuthError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => Self::NotFound(format!("{} not found", what)),
            DbError::Duplicate(msg) => Self::Conflict(msg),
            DbError::InvalidInput(msg) => Self::BadRequest(msg),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::PathRejection> for ApiError {
    fn from(err: axum::extract::rejection::PathRejection) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{}: validation failed", field))
                })
            })
            .collect();
        messages.sort();
        Self::ValidationError(messages.join(", "))
    }
}
