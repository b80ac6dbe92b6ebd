//! Job DTOs

use chrono::{DateTime, Utc};
use jobboard_auth::UserId;
use jobboard_db::{Job, JobChanges, JobId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::{require_not_blank, RequestBody};

/// Job posting request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 2, message = "title should be at least 2 characters long"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub req_experience: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
}

impl RequestBody for CreateJobRequest {
    fn check(&self) -> ApiResult<()> {
        require_not_blank("title", &self.title)
    }
}

/// Partial job update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJobRequest {
    #[validate(length(min = 2, message = "title should be at least 2 characters long"))]
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub req_experience: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
}

impl RequestBody for UpdateJobRequest {
    fn check(&self) -> ApiResult<()> {
        match &self.title {
            Some(title) => require_not_blank("title", title),
            None => Ok(()),
        }
    }
}

impl From<UpdateJobRequest> for JobChanges {
    fn from(req: UpdateJobRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            req_experience: req.req_experience,
            location: req.location,
        }
    }
}

/// Job as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: JobId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_experience: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub posted_date: DateTime<Utc>,
    pub employer_id: UserId,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            req_experience: job.req_experience,
            location: job.location,
            posted_date: job.posted_date,
            employer_id: job.employer_id,
        }
    }
}
