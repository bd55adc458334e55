use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::domain::{Job, JobId, JobStatus, MinCgpa, UserId, UserRole};
use super::errors::PlacementError;
use super::repository::{JobRepository, RepositoryError, UserRepository};

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

/// Inbound posting request. New postings always open ACTIVE.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPosting {
    pub posted_by: UserId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub min_cgpa: MinCgpa,
}

/// Thin pass-through service for posting management. Postings have no state
/// machine; a recruiter closes and reopens them freely, and a CLOSED posting
/// simply stops admitting applications through the eligibility gate.
pub struct JobBoard<S> {
    store: Arc<S>,
}

impl<S> JobBoard<S>
where
    S: UserRepository + JobRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Publish a posting on behalf of a recruiter. Non-recruiter posters are
    /// reported as missing recruiters.
    pub fn post(&self, posting: JobPosting) -> Result<Job, PlacementError> {
        let poster = self
            .store
            .fetch_user(&posting.posted_by)?
            .ok_or(PlacementError::NotFound("recruiter"))?;
        if poster.role() != UserRole::Recruiter {
            return Err(PlacementError::NotFound("recruiter"));
        }

        let job = Job {
            id: next_job_id(),
            posted_by: posting.posted_by,
            title: posting.title,
            description: posting.description,
            min_cgpa: posting.min_cgpa,
            status: JobStatus::Active,
        };

        match self.store.insert_job(job) {
            Ok(stored) => {
                info!(job = %stored.id.0, recruiter = %stored.posted_by.0, "job posted");
                Ok(stored)
            }
            Err(RepositoryError::Conflict) => Err(PlacementError::Conflict),
            Err(other) => Err(PlacementError::Store(other)),
        }
    }

    pub fn get(&self, id: &JobId) -> Result<Job, PlacementError> {
        self.store
            .fetch_job(id)?
            .ok_or(PlacementError::NotFound("job"))
    }

    /// Postings currently open for applications.
    pub fn active(&self) -> Result<Vec<Job>, PlacementError> {
        Ok(self.store.jobs_by_status(JobStatus::Active)?)
    }

    pub fn by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, PlacementError> {
        Ok(self.store.jobs_by_recruiter(recruiter)?)
    }

    pub fn set_status(&self, id: &JobId, status: JobStatus) -> Result<Job, PlacementError> {
        let mut job = self
            .store
            .fetch_job(id)?
            .ok_or(PlacementError::NotFound("job"))?;
        job.status = status;
        match self.store.update_job(job) {
            Ok(updated) => {
                info!(job = %updated.id.0, status = %updated.status, "job status changed");
                Ok(updated)
            }
            Err(RepositoryError::NotFound) => Err(PlacementError::NotFound("job")),
            Err(other) => Err(PlacementError::Store(other)),
        }
    }
}
