//! User Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use jobboard_auth::{gate, Identity, Role};
use std::sync::Arc;

use crate::dto::{RoleQuery, UserListItem};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List users of one role
///
/// `GET /api/users?role=<role>`, admins only.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Query(query): Query<RoleQuery>,
) -> ApiResult<Json<Vec<UserListItem>>> {
    gate::require_role(&identity, &[Role::Admin])?;

    let role: Role = query
        .role
        .ok_or_else(|| ApiError::MissingParameter("role".to_string()))?
        .parse()?;

    if role == Role::Admin {
        return Err(ApiError::Forbidden(
            "ADMIN cannot list other ADMIN accounts".to_string(),
        ));
    }

    let users = state
        .db
        .user_repo()
        .list_by_role(role)
        .into_iter()
        .map(UserListItem::from)
        .collect();

    Ok(Json(users))
}
