use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Application, ApplicationId, ApplicationStatus, JobId, UserId};
use super::eligibility::{evaluate, Eligibility};
use super::errors::PlacementError;
use super::repository::{
    ApplicationRepository, JobRepository, RepositoryError, UserRepository,
};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Owns the application state machine: the eligibility gate at creation and
/// the strict transition table afterwards. The only writer of application
/// status; callers hand it target values and it validates every change.
pub struct ApplicationLifecycle<S> {
    store: Arc<S>,
}

impl<S> ApplicationLifecycle<S>
where
    S: UserRepository + JobRepository + ApplicationRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Advisory eligibility check. `create` repeats it against fresh records
    /// before committing.
    pub fn check_eligibility(
        &self,
        student_id: &UserId,
        job_id: &JobId,
    ) -> Result<Eligibility, PlacementError> {
        let student = self
            .store
            .fetch_user(student_id)?
            .ok_or(PlacementError::NotFound("student"))?;
        let job = self
            .store
            .fetch_job(job_id)?
            .ok_or(PlacementError::NotFound("job"))?;
        let existing = self.store.applications_by_student(student_id)?;
        Ok(evaluate(&student, &job, &existing))
    }

    /// Create an application in SUBMITTED state after re-running the
    /// eligibility gate. A commit-time duplicate surfaces as `Conflict`,
    /// which callers treat the same as `Ineligible(AlreadyApplied)`.
    pub fn create(
        &self,
        student_id: &UserId,
        job_id: &JobId,
    ) -> Result<Application, PlacementError> {
        match self.check_eligibility(student_id, job_id)? {
            Eligibility::Ineligible(reason) => return Err(PlacementError::Ineligible(reason)),
            Eligibility::Eligible => {}
        }

        let application = Application {
            id: next_application_id(),
            student_id: student_id.clone(),
            job_id: job_id.clone(),
            status: ApplicationStatus::Submitted,
            created_at: Utc::now(),
        };

        match self.store.insert_application(application) {
            Ok(stored) => {
                info!(
                    application = %stored.id.0,
                    student = %stored.student_id.0,
                    job = %stored.job_id.0,
                    "application submitted"
                );
                Ok(stored)
            }
            Err(RepositoryError::Conflict) => Err(PlacementError::Conflict),
            Err(other) => Err(PlacementError::Store(other)),
        }
    }

    /// Move an application to `target`. The edge is validated against the
    /// adjacency table and committed with a compare-and-set on the status the
    /// validation saw.
    pub fn set_status(
        &self,
        id: &ApplicationId,
        target: ApplicationStatus,
    ) -> Result<Application, PlacementError> {
        let current = self
            .store
            .fetch_application(id)?
            .ok_or(PlacementError::NotFound("application"))?;

        if !current.status.permits(target) {
            return Err(PlacementError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        match self
            .store
            .update_application_status(id, current.status, target)
        {
            Ok(updated) => {
                info!(
                    application = %updated.id.0,
                    from = %current.status,
                    to = %updated.status,
                    "application status changed"
                );
                Ok(updated)
            }
            Err(RepositoryError::NotFound) => Err(PlacementError::NotFound("application")),
            Err(RepositoryError::Conflict) => Err(PlacementError::Conflict),
            Err(other) => Err(PlacementError::Store(other)),
        }
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, PlacementError> {
        self.store
            .fetch_application(id)?
            .ok_or(PlacementError::NotFound("application"))
    }

    pub fn by_student(&self, student_id: &UserId) -> Result<Vec<Application>, PlacementError> {
        Ok(self.store.applications_by_student(student_id)?)
    }

    pub fn by_job(&self, job_id: &JobId) -> Result<Vec<Application>, PlacementError> {
        Ok(self.store.applications_by_job(job_id)?)
    }

    pub fn list_all(&self) -> Result<Vec<Application>, PlacementError> {
        Ok(self.store.all_applications()?)
    }
}
