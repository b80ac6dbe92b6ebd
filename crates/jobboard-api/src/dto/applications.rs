//! Application DTOs

use chrono::{DateTime, Utc};
use jobboard_auth::UserId;
use jobboard_db::{Application, ApplicationId, JobId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::{require_not_blank, RequestBody};

/// Apply to a job
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    #[validate(length(min = 5, message = "cover_letter should be at least 5 characters long"))]
    pub cover_letter: String,
    #[validate(range(min = 1, message = "job_id must be positive"))]
    pub job_id: JobId,
}

impl RequestBody for CreateApplicationRequest {
    fn check(&self) -> ApiResult<()> {
        require_not_blank("cover_letter", &self.cover_letter)
    }
}

/// Replace an application's cover letter
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateApplicationRequest {
    #[validate(length(min = 5, message = "cover_letter should be at least 5 characters long"))]
    pub cover_letter: String,
}

impl RequestBody for UpdateApplicationRequest {
    fn check(&self) -> ApiResult<()> {
        require_not_blank("cover_letter", &self.cover_letter)
    }
}

/// Application as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: ApplicationId,
    pub cover_letter: String,
    pub applied_date: DateTime<Utc>,
    pub job_id: JobId,
    pub applicant_id: UserId,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            cover_letter: application.cover_letter,
            applied_date: application.applied_date,
            job_id: application.job_id,
            applicant_id: application.applicant_id,
        }
    }
}
