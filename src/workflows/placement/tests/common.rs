use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::workflows::placement::domain::{
    Application, ApplicationId, ApplicationStatus, Cgpa, Interview, InterviewId, Job, JobId,
    JobStatus, MinCgpa, RecruiterProfile, RoleProfile, StudentProfile, User, UserId, UserRole,
};
use crate::workflows::placement::memory::MemoryRecordStore;
use crate::workflows::placement::repository::{
    ApplicationRepository, InterviewRepository, JobRepository, RepositoryError, UserRepository,
};
use crate::workflows::placement::router::{placement_router, PlacementServices};

pub(super) fn student(id: &str, cgpa: Cgpa) -> User {
    User {
        id: UserId(id.to_string()),
        full_name: format!("Student {id}"),
        email: format!("{id}@campus.example"),
        phone: None,
        profile: RoleProfile::Student(StudentProfile {
            department: "Computer Science".to_string(),
            cgpa,
        }),
    }
}

pub(super) fn recruiter(id: &str) -> User {
    User {
        id: UserId(id.to_string()),
        full_name: format!("Recruiter {id}"),
        email: format!("{id}@nimbusworks.example"),
        phone: None,
        profile: RoleProfile::Recruiter(RecruiterProfile {
            company_name: "Nimbus Works".to_string(),
            designation: "Talent Lead".to_string(),
        }),
    }
}

pub(super) fn job(id: &str, posted_by: &str, min_cgpa: MinCgpa, status: JobStatus) -> Job {
    Job {
        id: JobId(id.to_string()),
        posted_by: UserId(posted_by.to_string()),
        title: format!("Posting {id}"),
        description: "Backend services team".to_string(),
        min_cgpa,
        status,
    }
}

pub(super) fn application(id: &str, student: &str, job: &str, status: ApplicationStatus) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        student_id: UserId(student.to_string()),
        job_id: JobId(job.to_string()),
        status,
        created_at: Utc::now() - Duration::days(1),
    }
}

/// Store seeded with the cast the suites share: two graded students, one
/// without a recorded average, a recruiter, and three postings covering the
/// eligibility branches.
pub(super) fn seeded_store() -> Arc<MemoryRecordStore> {
    let store = Arc::new(MemoryRecordStore::new());

    for user in [
        student("stu-amara", Cgpa::Recorded(8.0)),
        student("stu-divya", Cgpa::Recorded(7.0)),
        student("stu-noah", Cgpa::Unrecorded),
        recruiter("rec-priya"),
    ] {
        store.insert_user(user).expect("seed user");
    }

    for posting in [
        job("job-core", "rec-priya", MinCgpa::AtLeast(0.75), JobStatus::Active),
        job("job-open", "rec-priya", MinCgpa::NotRequired, JobStatus::Active),
        job("job-frozen", "rec-priya", MinCgpa::NotRequired, JobStatus::Closed),
    ] {
        store.insert_job(posting).expect("seed job");
    }

    store
}

pub(super) fn build_services() -> (PlacementServices<MemoryRecordStore>, Arc<MemoryRecordStore>) {
    let store = seeded_store();
    (PlacementServices::new(store.clone()), store)
}

pub(super) fn build_router() -> axum::Router {
    let (services, _) = build_services();
    placement_router(services)
}

pub(super) fn uid(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn jid(id: &str) -> JobId {
    JobId(id.to_string())
}

/// Store whose application table refuses every insert, standing in for a
/// second caller committing first.
pub(super) struct ConflictingApplications {
    inner: Arc<MemoryRecordStore>,
}

impl ConflictingApplications {
    pub(super) fn new(inner: Arc<MemoryRecordStore>) -> Self {
        Self { inner }
    }
}

impl UserRepository for ConflictingApplications {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        self.inner.insert_user(user)
    }

    fn update_user(&self, user: User) -> Result<User, RepositoryError> {
        self.inner.update_user(user)
    }

    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.inner.fetch_user(id)
    }

    fn users_by_role(&self, role: UserRole) -> Result<Vec<User>, RepositoryError> {
        self.inner.users_by_role(role)
    }
}

impl JobRepository for ConflictingApplications {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.inner.insert_job(job)
    }

    fn update_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.inner.update_job(job)
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.inner.fetch_job(id)
    }

    fn jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>, RepositoryError> {
        self.inner.jobs_by_status(status)
    }

    fn jobs_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, RepositoryError> {
        self.inner.jobs_by_recruiter(recruiter)
    }
}

impl ApplicationRepository for ConflictingApplications {
    fn insert_application(
        &self,
        _application: Application,
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update_application_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        self.inner.update_application_status(id, expected, next)
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        self.inner.fetch_application(id)
    }

    fn applications_by_student(
        &self,
        student: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        self.inner.applications_by_student(student)
    }

    fn applications_by_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        self.inner.applications_by_job(job)
    }

    fn all_applications(&self) -> Result<Vec<Application>, RepositoryError> {
        self.inner.all_applications()
    }
}

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

/// Store that fails every operation, for error propagation checks.
pub(super) struct UnavailableStore;

impl UserRepository for UnavailableStore {
    fn insert_user(&self, _user: User) -> Result<User, RepositoryError> {
        offline()
    }

    fn update_user(&self, _user: User) -> Result<User, RepositoryError> {
        offline()
    }

    fn fetch_user(&self, _id: &UserId) -> Result<Option<User>, RepositoryError> {
        offline()
    }

    fn users_by_role(&self, _role: UserRole) -> Result<Vec<User>, RepositoryError> {
        offline()
    }
}

impl JobRepository for UnavailableStore {
    fn insert_job(&self, _job: Job) -> Result<Job, RepositoryError> {
        offline()
    }

    fn update_job(&self, _job: Job) -> Result<Job, RepositoryError> {
        offline()
    }

    fn fetch_job(&self, _id: &JobId) -> Result<Option<Job>, RepositoryError> {
        offline()
    }

    fn jobs_by_status(&self, _status: JobStatus) -> Result<Vec<Job>, RepositoryError> {
        offline()
    }

    fn jobs_by_recruiter(&self, _recruiter: &UserId) -> Result<Vec<Job>, RepositoryError> {
        offline()
    }
}

impl ApplicationRepository for UnavailableStore {
    fn insert_application(
        &self,
        _application: Application,
    ) -> Result<Application, RepositoryError> {
        offline()
    }

    fn update_application_status(
        &self,
        _id: &ApplicationId,
        _expected: ApplicationStatus,
        _next: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        offline()
    }

    fn fetch_application(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        offline()
    }

    fn applications_by_student(
        &self,
        _student: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        offline()
    }

    fn applications_by_job(&self, _job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        offline()
    }

    fn all_applications(&self) -> Result<Vec<Application>, RepositoryError> {
        offline()
    }
}

impl InterviewRepository for UnavailableStore {
    fn insert_interview(&self, _interview: Interview) -> Result<Interview, RepositoryError> {
        offline()
    }

    fn update_interview(&self, _interview: Interview) -> Result<Interview, RepositoryError> {
        offline()
    }

    fn fetch_interview(&self, _id: &InterviewId) -> Result<Option<Interview>, RepositoryError> {
        offline()
    }

    fn interviews_by_application(
        &self,
        _application: &ApplicationId,
    ) -> Result<Vec<Interview>, RepositoryError> {
        offline()
    }

    fn all_interviews(&self) -> Result<Vec<Interview>, RepositoryError> {
        offline()
    }
}
