//! Jobboard Storage Layer
//!
//! In-memory repositories for users, jobs and applications. Each repository
//! is a cheap clonable handle over shared concurrent maps, so the API layer
//! can hold one per request without locking.
//!
//! `UserRepo` also implements [`jobboard_auth::UserDirectory`], which is how
//! the authentication layer reaches stored users.

pub mod error;
pub mod models;
pub mod repos;

use tracing::info;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repos::*;

/// All repositories of one running service
#[derive(Clone, Default)]
pub struct Database {
    users: UserRepo,
    jobs: JobRepo,
    applications: ApplicationRepo,
}

impl Database {
    /// Create empty stores
    pub fn new() -> Self {
        info!("Initialising in-memory stores");
        Self::default()
    }

    /// Get user repository
    pub fn user_repo(&self) -> UserRepo {
        self.users.clone()
    }

    /// Get job repository
    pub fn job_repo(&self) -> JobRepo {
        self.jobs.clone()
    }

    /// Get application repository
    pub fn application_repo(&self) -> ApplicationRepo {
        self.applications.clone()
    }

    /// Delete a job together with every application made to it
    pub fn delete_job(&self, job_id: JobId) -> DbResult<Job> {
        let job = self.jobs.delete(job_id)?;
        let removed = self.applications.delete_by_job(job_id);
        info!(job_id, applications_removed = removed, "Job deleted");
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repos_share_state() {
        let db = Database::new();
        let job = db
            .job_repo()
            .create(NewJob {
                title: "Backend".to_string(),
                description: None,
                req_experience: None,
                location: None,
                employer_id: 1,
            })
            .unwrap();

        assert_eq!(db.job_repo().find_by_id(job.id), Some(job));
    }

    #[test]
    fn test_delete_job_cascades() {
        let db = Database::new();
        let job = db
            .job_repo()
            .create(NewJob {
                title: "Backend".to_string(),
                description: None,
                req_experience: None,
                location: None,
                employer_id: 1,
            })
            .unwrap();
        for applicant_id in [2, 3] {
            db.application_repo()
                .create(NewApplication {
                    cover_letter: "Hello there".to_string(),
                    job_id: job.id,
                    applicant_id,
                })
                .unwrap();
        }

        db.delete_job(job.id).unwrap();

        assert!(db.job_repo().find_by_id(job.id).is_none());
        assert!(db.application_repo().list_all().is_empty());
        assert!(matches!(db.delete_job(job.id), Err(DbError::NotFound(_))));
    }
}
