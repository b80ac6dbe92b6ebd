//! API Routes
//!
//! Route definitions for all API endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Create `/api` routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/auth", auth_routes())
        .route("/users", get(handlers::users::list_users))
        .merge(job_routes())
        .merge(application_routes())
}

/// Authentication routes
fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
}

/// Job routes
fn job_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/jobs",
            post(handlers::jobs::create_job).get(handlers::jobs::list_jobs),
        )
        .route(
            "/jobs/:job_id",
            patch(handlers::jobs::update_job).delete(handlers::jobs::delete_job),
        )
}

/// Application routes
fn application_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/applications",
            post(handlers::applications::create_application)
                .get(handlers::applications::list_applications),
        )
        .route(
            "/applications/:application_id",
            patch(handlers::applications::update_application)
                .delete(handlers::applications::delete_application),
        )
}
