//! Job repository

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use jobboard_auth::UserId;
use tracing::debug;

use crate::{DbError, DbResult, Job, JobChanges, JobId, NewJob};

/// Job postings keyed by id
#[derive(Clone, Default)]
pub struct JobRepo {
    jobs: Arc<DashMap<JobId, Job>>,
    seq: Arc<AtomicI64>,
}

impl JobRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a job posted now
    pub fn create(&self, job: NewJob) -> DbResult<Job> {
        if job.title.trim().is_empty() {
            return Err(DbError::InvalidInput("Job title must not be blank".to_string()));
        }

        let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let job = Job {
            id,
            title: job.title,
            description: job.description,
            req_experience: job.req_experience,
            location: job.location,
            posted_date: Utc::now(),
            employer_id: job.employer_id,
        };
        self.jobs.insert(id, job.clone());

        debug!(job_id = id, employer_id = job.employer_id, "Job stored");
        Ok(job)
    }

    pub fn find_by_id(&self, id: JobId) -> Option<Job> {
        self.jobs.get(&id).map(|j| j.value().clone())
    }

    pub fn exists(&self, id: JobId) -> bool {
        self.jobs.contains_key(&id)
    }

    /// Every job, ordered by id
    pub fn list_all(&self) -> Vec<Job> {
        self.collect(|_| true)
    }

    /// Jobs posted by one employer, ordered by id
    pub fn list_by_employer(&self, employer_id: UserId) -> Vec<Job> {
        self.collect(|job| job.employer_id == employer_id)
    }

    /// Apply the present fields of `changes`
    pub fn update(&self, id: JobId, changes: JobChanges) -> DbResult<Job> {
        let mut job = self
            .jobs
            .get_mut(&id)
            .ok_or_else(|| DbError::NotFound(format!("Job {}", id)))?;

        if let Some(title) = changes.title {
            job.title = title;
        }
        if let Some(description) = changes.description {
            job.description = Some(description);
        }
        if let Some(req_experience) = changes.req_experience {
            job.req_experience = Some(req_experience);
        }
        if let Some(location) = changes.location {
            job.location = Some(location);
        }

        Ok(job.clone())
    }

    pub fn delete(&self, id: JobId) -> DbResult<Job> {
        self.jobs
            .remove(&id)
            .map(|(_, job)| job)
            .ok_or_else(|| DbError::NotFound(format!("Job {}", id)))
    }

    fn collect(&self, keep: impl Fn(&Job) -> bool) -> Vec<Job> {
        let mut jobs: Vec<Job> = self
            .jobs
            .iter()
            .filter(|j| keep(j.value()))
            .map(|j| j.value().clone())
            .collect();
        jobs.sort_by_key(|j| j.id);
        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_job(title: &str, employer_id: UserId) -> NewJob {
        NewJob {
            title: title.to_string(),
            description: Some("Build things".to_string()),
            req_experience: None,
            location: Some("Remote".to_string()),
            employer_id,
        }
    }

    #[test]
    fn test_create_and_find() {
        let repo = JobRepo::new();
        let job = repo.create(new_job("Rust Engineer", 5)).unwrap();

        assert_eq!(job.id, 1);
        assert_eq!(repo.find_by_id(1), Some(job));
        assert!(repo.find_by_id(2).is_none());
    }

    #[test]
    fn test_blank_title_rejected() {
        let repo = JobRepo::new();
        assert!(matches!(repo.create(new_job("   ", 5)), Err(DbError::InvalidInput(_))));
    }

    #[test]
    fn test_list_by_employer() {
        let repo = JobRepo::new();
        repo.create(new_job("a", 5)).unwrap();
        repo.create(new_job("b", 6)).unwrap();
        repo.create(new_job("c", 5)).unwrap();

        let titles: Vec<_> = repo.list_by_employer(5).into_iter().map(|j| j.title).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(repo.list_all().len(), 3);
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let repo = JobRepo::new();
        let job = repo.create(new_job("Old title", 5)).unwrap();

        let updated = repo
            .update(
                job.id,
                JobChanges {
                    title: Some("New title".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.location.as_deref(), Some("Remote"));
        assert_eq!(updated.posted_date, job.posted_date);
        assert_eq!(updated.employer_id, 5);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let repo = JobRepo::new();
        assert!(matches!(repo.update(9, JobChanges::default()), Err(DbError::NotFound(_))));
        assert!(matches!(repo.delete(9), Err(DbError::NotFound(_))));
    }
}
