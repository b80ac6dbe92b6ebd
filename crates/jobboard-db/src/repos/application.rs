//! Application repository

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use jobboard_auth::UserId;
use tracing::debug;

use crate::{Application, ApplicationId, DbError, DbResult, JobId, NewApplication};

/// Job applications keyed by id
#[derive(Clone, Default)]
pub struct ApplicationRepo {
    applications: Arc<DashMap<ApplicationId, Application>>,
    seq: Arc<AtomicI64>,
}

impl ApplicationRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an application dated now
    pub fn create(&self, application: NewApplication) -> DbResult<Application> {
        let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let application = Application {
            id,
            cover_letter: application.cover_letter,
            applied_date: Utc::now(),
            job_id: application.job_id,
            applicant_id: application.applicant_id,
        };
        self.applications.insert(id, application.clone());

        debug!(
            application_id = id,
            job_id = application.job_id,
            applicant_id = application.applicant_id,
            "Application stored"
        );
        Ok(application)
    }

    pub fn find_by_id(&self, id: ApplicationId) -> Option<Application> {
        self.applications.get(&id).map(|a| a.value().clone())
    }

    /// Every application, ordered by id
    pub fn list_all(&self) -> Vec<Application> {
        self.collect(|_| true)
    }

    pub fn list_by_applicant(&self, applicant_id: UserId) -> Vec<Application> {
        self.collect(|a| a.applicant_id == applicant_id)
    }

    /// Replace the cover letter; the applied date is left untouched
    pub fn update_cover_letter(&self, id: ApplicationId, cover_letter: String) -> DbResult<Application> {
        let mut application = self
            .applications
            .get_mut(&id)
            .ok_or_else(|| DbError::NotFound(format!("Application {}", id)))?;
        application.cover_letter = cover_letter;
        Ok(application.clone())
    }

    pub fn delete(&self, id: ApplicationId) -> DbResult<Application> {
        self.applications
            .remove(&id)
            .map(|(_, a)| a)
            .ok_or_else(|| DbError::NotFound(format!("Application {}", id)))
    }

    /// Remove every application for a job, returning how many went
    pub fn delete_by_job(&self, job_id: JobId) -> usize {
        let mut removed = 0;
        self.applications.retain(|_, a| {
            let keep = a.job_id != job_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    fn collect(&self, keep: impl Fn(&Application) -> bool) -> Vec<Application> {
        let mut applications: Vec<Application> = self
            .applications
            .iter()
            .filter(|a| keep(a.value()))
            .map(|a| a.value().clone())
            .collect();
        applications.sort_by_key(|a| a.id);
        applications
    }
}
