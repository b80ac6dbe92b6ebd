//! Application Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use jobboard_auth::{gate, Access, Identity, Role};
use jobboard_db::{ApplicationId, NewApplication};
use std::sync::Arc;
use tracing::info;

use crate::dto::{ApplicationResponse, CreateApplicationRequest, UpdateApplicationRequest};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{path_param, validated};
use crate::state::AppState;

fn application_not_found(application_id: ApplicationId) -> ApiError {
    ApiError::NotFound(format!("Application with id {} not found", application_id))
}

/// Apply to an existing job
pub async fn create_application(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    body: Result<Json<CreateApplicationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApplicationResponse>)> {
    let caller = gate::require_role(&identity, &[Role::JobSeeker])?;
    let request = validated(body)?;

    if !state.db.job_repo().exists(request.job_id) {
        return Err(ApiError::NotFound(format!(
            "Job with id {} not found",
            request.job_id
        )));
    }

    let application = state.db.application_repo().create(NewApplication {
        cover_letter: request.cover_letter,
        job_id: request.job_id,
        applicant_id: caller.user_id,
    })?;

    info!(
        application_id = application.id,
        job_id = application.job_id,
        applicant_id = caller.user_id,
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(application.into())))
}

/// The caller's applications, or every application for an admin
pub async fn list_applications(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> ApiResult<Json<Vec<ApplicationResponse>>> {
    let caller = gate::require_role(&identity, &[Role::JobSeeker, Role::Admin])?;

    let repo = state.db.application_repo();
    let applications = match gate::list_scope(caller) {
        Some(applicant_id) => repo.list_by_applicant(applicant_id),
        None => repo.list_all(),
    };

    Ok(Json(applications.into_iter().map(ApplicationResponse::from).collect()))
}

/// Replace the cover letter of the caller's own application
pub async fn update_application(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    path: Result<Path<ApplicationId>, PathRejection>,
    body: Result<Json<UpdateApplicationRequest>, JsonRejection>,
) -> ApiResult<Json<ApplicationResponse>> {
    let caller = gate::require_role(&identity, &[Role::JobSeeker])?;
    let application_id = path_param(path)?;
    let request = validated(body)?;

    let repo = state.db.application_repo();
    let application = repo
        .find_by_id(application_id)
        .ok_or_else(|| application_not_found(application_id))?;
    gate::require_ownership(caller, application.applicant_id, Access::Update)?;

    let updated = repo.update_cover_letter(application_id, request.cover_letter)?;

    Ok(Json(updated.into()))
}

/// Withdraw an application
pub async fn delete_application(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    path: Result<Path<ApplicationId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let caller = gate::require_role(&identity, &[Role::JobSeeker, Role::Admin])?;
    let application_id = path_param(path)?;

    let repo = state.db.application_repo();
    let application = repo
        .find_by_id(application_id)
        .ok_or_else(|| application_not_found(application_id))?;
    gate::require_ownership(caller, application.applicant_id, Access::Delete)?;

    repo.delete(application_id)?;
    info!(application_id, user_id = caller.user_id, "Application deleted");

    Ok(StatusCode::NO_CONTENT)
}
