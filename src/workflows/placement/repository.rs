//! Record store boundary for the placement workflow.
//!
//! The lifecycle services only see these traits; anything that can load and
//! save the four record types can back them. The two invariants that need
//! commit-time coordination live here rather than in service logic:
//! duplicate-application rejection on insert and compare-and-set status
//! writes, so two callers racing past the same pre-check cannot both commit.

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Interview, InterviewId, Job, JobId, JobStatus,
    User, UserId, UserRole,
};

/// Error enumeration for record store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for user records. Registration is handled elsewhere; the workflow
/// only reads users and applies profile updates.
pub trait UserRepository: Send + Sync {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError>;
    fn update_user(&self, user: User) -> Result<User, RepositoryError>;
    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn users_by_role(&self, role: UserRole) -> Result<Vec<User>, RepositoryError>;
}

/// Storage for job postings.
pub trait JobRepository: Send + Sync {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError>;
    fn update_job(&self, job: Job) -> Result<Job, RepositoryError>;
    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>, RepositoryError>;
    fn jobs_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, RepositoryError>;
}

/// Storage for applications.
///
/// `insert_application` must refuse (Conflict) a record whose (student, job)
/// pair already has a non-withdrawn application, and
/// `update_application_status` must only write when the stored status still
/// equals `expected`. Both checks happen inside the store's own
/// serialization boundary.
pub trait ApplicationRepository: Send + Sync {
    fn insert_application(&self, application: Application)
        -> Result<Application, RepositoryError>;
    fn update_application_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, RepositoryError>;
    fn fetch_application(&self, id: &ApplicationId)
        -> Result<Option<Application>, RepositoryError>;
    fn applications_by_student(&self, student: &UserId)
        -> Result<Vec<Application>, RepositoryError>;
    fn applications_by_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError>;
    fn all_applications(&self) -> Result<Vec<Application>, RepositoryError>;
}

/// Convenience bound for callers that need the whole record store.
pub trait PlacementRecordStore:
    UserRepository + JobRepository + ApplicationRepository + InterviewRepository
{
}

impl<T> PlacementRecordStore for T where
    T: UserRepository + JobRepository + ApplicationRepository + InterviewRepository
{
}

/// Storage for interview rounds.
pub trait InterviewRepository: Send + Sync {
    fn insert_interview(&self, interview: Interview) -> Result<Interview, RepositoryError>;
    fn update_interview(&self, interview: Interview) -> Result<Interview, RepositoryError>;
    fn fetch_interview(&self, id: &InterviewId) -> Result<Option<Interview>, RepositoryError>;
    fn interviews_by_application(
        &self,
        application: &ApplicationId,
    ) -> Result<Vec<Interview>, RepositoryError>;
    fn all_interviews(&self) -> Result<Vec<Interview>, RepositoryError>;
}
