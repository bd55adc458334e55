use std::sync::Mutex;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Interview, InterviewId, Job, JobId, JobStatus,
    User, UserId, UserRole,
};
use super::repository::{
    ApplicationRepository, InterviewRepository, JobRepository, RepositoryError, UserRepository,
};

/// Shared in-memory record store backing the service binary and the test
/// suites. Every table is a mutex-guarded vector, so listings come back in
/// stable insertion order and the uniqueness and compare-and-set checks run
/// while the table lock is held.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    users: Mutex<Vec<User>>,
    jobs: Mutex<Vec<Job>>,
    applications: Mutex<Vec<Application>>,
    interviews: Mutex<Vec<Interview>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryRecordStore {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().expect("user table mutex poisoned");
        if users.iter().any(|existing| existing.id == user.id) {
            return Err(RepositoryError::Conflict);
        }
        users.push(user.clone());
        Ok(user)
    }

    fn update_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().expect("user table mutex poisoned");
        match users.iter_mut().find(|existing| existing.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().expect("user table mutex poisoned");
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    fn users_by_role(&self, role: UserRole) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.lock().expect("user table mutex poisoned");
        Ok(users
            .iter()
            .filter(|user| user.role() == role)
            .cloned()
            .collect())
    }
}

impl JobRepository for MemoryRecordStore {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut jobs = self.jobs.lock().expect("job table mutex poisoned");
        if jobs.iter().any(|existing| existing.id == job.id) {
            return Err(RepositoryError::Conflict);
        }
        jobs.push(job.clone());
        Ok(job)
    }

    fn update_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut jobs = self.jobs.lock().expect("job table mutex poisoned");
        match jobs.iter_mut().find(|existing| existing.id == job.id) {
            Some(slot) => {
                *slot = job.clone();
                Ok(job)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let jobs = self.jobs.lock().expect("job table mutex poisoned");
        Ok(jobs.iter().find(|job| job.id == *id).cloned())
    }

    fn jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>, RepositoryError> {
        let jobs = self.jobs.lock().expect("job table mutex poisoned");
        Ok(jobs.iter().filter(|job| job.status == status).cloned().collect())
    }

    fn jobs_by_recruiter(&self, recruiter: &UserId) -> Result<Vec<Job>, RepositoryError> {
        let jobs = self.jobs.lock().expect("job table mutex poisoned");
        Ok(jobs
            .iter()
            .filter(|job| job.posted_by == *recruiter)
            .cloned()
            .collect())
    }
}

impl ApplicationRepository for MemoryRecordStore {
    fn insert_application(
        &self,
        application: Application,
    ) -> Result<Application, RepositoryError> {
        let mut applications = self
            .applications
            .lock()
            .expect("application table mutex poisoned");
        let duplicate = applications.iter().any(|existing| {
            existing.id == application.id
                || (existing.student_id == application.student_id
                    && existing.blocks_reapplication_to(&application.job_id))
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        applications.push(application.clone());
        Ok(application)
    }

    fn update_application_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        let mut applications = self
            .applications
            .lock()
            .expect("application table mutex poisoned");
        match applications.iter_mut().find(|existing| existing.id == *id) {
            Some(application) => {
                if application.status != expected {
                    return Err(RepositoryError::Conflict);
                }
                application.status = next;
                Ok(application.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        let applications = self
            .applications
            .lock()
            .expect("application table mutex poisoned");
        Ok(applications
            .iter()
            .find(|application| application.id == *id)
            .cloned())
    }

    fn applications_by_student(
        &self,
        student: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let applications = self
            .applications
            .lock()
            .expect("application table mutex poisoned");
        Ok(applications
            .iter()
            .filter(|application| application.student_id == *student)
            .cloned()
            .collect())
    }

    fn applications_by_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        let applications = self
            .applications
            .lock()
            .expect("application table mutex poisoned");
        Ok(applications
            .iter()
            .filter(|application| application.job_id == *job)
            .cloned()
            .collect())
    }

    fn all_applications(&self) -> Result<Vec<Application>, RepositoryError> {
        let applications = self
            .applications
            .lock()
            .expect("application table mutex poisoned");
        Ok(applications.clone())
    }
}

impl InterviewRepository for MemoryRecordStore {
    fn insert_interview(&self, interview: Interview) -> Result<Interview, RepositoryError> {
        let mut interviews = self
            .interviews
            .lock()
            .expect("interview table mutex poisoned");
        if interviews.iter().any(|existing| existing.id == interview.id) {
            return Err(RepositoryError::Conflict);
        }
        interviews.push(interview.clone());
        Ok(interview)
    }

    fn update_interview(&self, interview: Interview) -> Result<Interview, RepositoryError> {
        let mut interviews = self
            .interviews
            .lock()
            .expect("interview table mutex poisoned");
        match interviews.iter_mut().find(|existing| existing.id == interview.id) {
            Some(slot) => {
                *slot = interview.clone();
                Ok(interview)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_interview(&self, id: &InterviewId) -> Result<Option<Interview>, RepositoryError> {
        let interviews = self
            .interviews
            .lock()
            .expect("interview table mutex poisoned");
        Ok(interviews
            .iter()
            .find(|interview| interview.id == *id)
            .cloned())
    }

    fn interviews_by_application(
        &self,
        application: &ApplicationId,
    ) -> Result<Vec<Interview>, RepositoryError> {
        let interviews = self
            .interviews
            .lock()
            .expect("interview table mutex poisoned");
        Ok(interviews
            .iter()
            .filter(|interview| interview.application_id == *application)
            .cloned()
            .collect())
    }

    fn all_interviews(&self) -> Result<Vec<Interview>, RepositoryError> {
        let interviews = self
            .interviews
            .lock()
            .expect("interview table mutex poisoned");
        Ok(interviews.clone())
    }
}
