//! Authentication Handlers
//!
//! Signup and login. Both are public; the identity layer leaves them
//! anonymous unless a token happens to be attached.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use jobboard_auth::{Registration, UserSummary};
use std::sync::Arc;

use crate::dto::{LoginRequest, MessageResponse, RoleQuery, SignupRequest};
use crate::error::{ApiError, ApiResult};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// User signup
///
/// `POST /api/auth/signup?role=<role>`
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoleQuery>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserSummary>)> {
    let role = query
        .role
        .ok_or_else(|| ApiError::MissingParameter("role".to_string()))?;

    let summary = state
        .auth
        .register(
            Registration {
                username: request.username,
                email: request.email,
                secret: request.password,
            },
            &role,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(summary)))
}

/// User login
///
/// `POST /api/auth/login`; the token travels in the `Authorization` header.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let issued = state.auth.login(&request.username, &request.password).await?;

    Ok((
        [(header::AUTHORIZATION, issued.bearer())],
        Json(MessageResponse::new("User logged in successfully")),
    ))
}
