//! Job Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use jobboard_auth::{gate, Access, Identity, Role};
use jobboard_db::{JobId, NewJob};
use std::sync::Arc;
use tracing::info;

use crate::dto::{CreateJobRequest, JobResponse, UpdateJobRequest};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{path_param, validated};
use crate::state::AppState;

fn job_not_found(job_id: JobId) -> ApiError {
    ApiError::NotFound(format!("Job with id {} not found", job_id))
}

/// Post a job owned by the calling employer
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    body: Result<Json<CreateJobRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<JobResponse>)> {
    let caller = gate::require_role(&identity, &[Role::Employer])?;
    let request = validated(body)?;

    let job = state.db.job_repo().create(NewJob {
        title: request.title,
        description: request.description,
        req_experience: request.req_experience,
        location: request.location,
        employer_id: caller.user_id,
    })?;

    info!(job_id = job.id, employer_id = caller.user_id, "Job posted");

    Ok((StatusCode::CREATED, Json(job.into())))
}

/// The caller's jobs, or every job for an admin
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> ApiResult<Json<Vec<JobResponse>>> {
    let caller = gate::require_role(&identity, &[Role::Employer, Role::Admin])?;

    let repo = state.db.job_repo();
    let jobs = match gate::list_scope(caller) {
        Some(employer_id) => repo.list_by_employer(employer_id),
        None => repo.list_all(),
    };

    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// Partially update a job; only the employer who posted it may do this
pub async fn update_job(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    path: Result<Path<JobId>, PathRejection>,
    body: Result<Json<UpdateJobRequest>, JsonRejection>,
) -> ApiResult<Json<JobResponse>> {
    let caller = gate::require_role(&identity, &[Role::Employer])?;
    let job_id = path_param(path)?;
    let request = validated(body)?;

    let repo = state.db.job_repo();
    let job = repo.find_by_id(job_id).ok_or_else(|| job_not_found(job_id))?;
    gate::require_ownership(caller, job.employer_id, Access::Update)?;

    let updated = repo.update(job_id, request.into())?;

    Ok(Json(updated.into()))
}

/// Delete a job and its applications
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    path: Result<Path<JobId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let caller = gate::require_role(&identity, &[Role::Employer, Role::Admin])?;
    let job_id = path_param(path)?;

    let job = state
        .db
        .job_repo()
        .find_by_id(job_id)
        .ok_or_else(|| job_not_found(job_id))?;
    gate::require_ownership(caller, job.employer_id, Access::Delete)?;

    state.db.delete_job(job_id)?;

    Ok(StatusCode::NO_CONTENT)
}
