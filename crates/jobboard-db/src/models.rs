//! Stored records for jobs and applications

use chrono::{DateTime, Utc};
use jobboard_auth::UserId;
use serde::{Deserialize, Serialize};

pub type JobId = i64;
pub type ApplicationId = i64;

// ============================================================================
// Job Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: Option<String>,
    pub req_experience: Option<i32>,
    pub location: Option<String>,
    pub posted_date: DateTime<Utc>,
    pub employer_id: UserId,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: Option<String>,
    pub req_experience: Option<i32>,
    pub location: Option<String>,
    pub employer_id: UserId,
}

/// Partial update; `None` leaves the field as it is
#[derive(Debug, Clone, Default)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub req_experience: Option<i32>,
    pub location: Option<String>,
}

// ============================================================================
// Application Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub cover_letter: String,
    pub applied_date: DateTime<Utc>,
    pub job_id: JobId,
    pub applicant_id: UserId,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub cover_letter: String,
    pub job_id: JobId,
    pub applicant_id: UserId,
}
