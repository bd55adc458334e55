use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::applications::ApplicationLifecycle;
use super::domain::{
    Application, ApplicationId, ApplicationStatus, Interview, InterviewId, InterviewResult,
    InterviewStatus,
};
use super::errors::PlacementError;
use super::repository::{
    ApplicationRepository, InterviewRepository, JobRepository, RepositoryError, UserRepository,
};

static INTERVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_interview_id() -> InterviewId {
    let id = INTERVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InterviewId(format!("int-{id:06}"))
}

/// Inbound scheduling request for a new interview round.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    pub application_id: ApplicationId,
    pub round: String,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
}

/// Partial update applied to an interview round. Only supplied fields change.
///
/// Status and result accept any enumerated value; outcome entry is
/// human-driven and carries no transition graph. The routing fields steer
/// what a PASSED or FAILED result does to the parent application:
/// `further_rounds` picks INTERVIEW over OFFERED on a pass, and
/// `application_status` overrides the recommendation entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterviewUpdate {
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<InterviewStatus>,
    #[serde(default)]
    pub result: Option<InterviewResult>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub further_rounds: bool,
    #[serde(default)]
    pub application_status: Option<ApplicationStatus>,
}

/// Owns interview scheduling and outcome recording for an application, and
/// feeds recorded outcomes back into the application state machine.
pub struct InterviewLifecycle<S> {
    store: Arc<S>,
    applications: Arc<ApplicationLifecycle<S>>,
}

impl<S> InterviewLifecycle<S>
where
    S: UserRepository + JobRepository + ApplicationRepository + InterviewRepository + 'static,
{
    pub fn new(store: Arc<S>, applications: Arc<ApplicationLifecycle<S>>) -> Self {
        Self {
            store,
            applications,
        }
    }

    /// Schedule a round against an open application. A terminal application
    /// is reported as missing: there is nothing left to interview for.
    pub fn schedule(
        &self,
        application_id: &ApplicationId,
        round: String,
        scheduled_at: DateTime<Utc>,
        location: String,
    ) -> Result<Interview, PlacementError> {
        let application = self.open_application(application_id)?;

        let interview = Interview {
            id: next_interview_id(),
            application_id: application.id.clone(),
            round,
            scheduled_at,
            location,
            status: InterviewStatus::Scheduled,
            result: InterviewResult::Pending,
            feedback: None,
            created_at: Utc::now(),
        };

        match self.store.insert_interview(interview) {
            Ok(stored) => {
                info!(
                    interview = %stored.id.0,
                    application = %stored.application_id.0,
                    round = %stored.round,
                    "interview scheduled"
                );
                Ok(stored)
            }
            Err(RepositoryError::Conflict) => Err(PlacementError::Conflict),
            Err(other) => Err(PlacementError::Store(other)),
        }
    }

    /// Apply a partial update, then route any newly recorded PASSED or FAILED
    /// result into the application state machine: FAILED recommends REJECTED,
    /// PASSED recommends INTERVIEW while further rounds remain and OFFERED on
    /// the final one. An explicit `application_status` wins over the
    /// recommendation, and a target the application already holds is skipped.
    pub fn update(
        &self,
        id: &InterviewId,
        update: InterviewUpdate,
    ) -> Result<Interview, PlacementError> {
        let mut interview = self
            .store
            .fetch_interview(id)?
            .ok_or(PlacementError::NotFound("interview"))?;
        let previous_result = interview.result;

        if let Some(scheduled_at) = update.scheduled_at {
            interview.scheduled_at = scheduled_at;
        }
        if let Some(location) = update.location.clone() {
            interview.location = location;
        }
        if let Some(status) = update.status {
            interview.status = status;
        }
        if let Some(result) = update.result {
            interview.result = result;
        }
        if let Some(feedback) = update.feedback.clone() {
            interview.feedback = Some(feedback);
        }

        let stored = match self.store.update_interview(interview) {
            Ok(stored) => stored,
            Err(RepositoryError::NotFound) => {
                return Err(PlacementError::NotFound("interview"))
            }
            Err(other) => return Err(PlacementError::Store(other)),
        };

        if stored.result != previous_result && stored.result != InterviewResult::Pending {
            self.route_outcome(&stored, &update)?;
        }

        Ok(stored)
    }

    fn route_outcome(
        &self,
        interview: &Interview,
        update: &InterviewUpdate,
    ) -> Result<(), PlacementError> {
        let recommended = match interview.result {
            InterviewResult::Failed => ApplicationStatus::Rejected,
            InterviewResult::Passed if update.further_rounds => ApplicationStatus::Interview,
            InterviewResult::Passed => ApplicationStatus::Offered,
            InterviewResult::Pending => return Ok(()),
        };
        let target = update.application_status.unwrap_or(recommended);

        let application = self
            .store
            .fetch_application(&interview.application_id)?
            .ok_or(PlacementError::NotFound("application"))?;
        if application.status == target {
            return Ok(());
        }

        info!(
            interview = %interview.id.0,
            application = %interview.application_id.0,
            result = %interview.result,
            target = %target,
            "routing interview outcome"
        );
        self.applications
            .set_status(&interview.application_id, target)?;
        Ok(())
    }

    pub fn get(&self, id: &InterviewId) -> Result<Interview, PlacementError> {
        self.store
            .fetch_interview(id)?
            .ok_or(PlacementError::NotFound("interview"))
    }

    pub fn by_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<Interview>, PlacementError> {
        Ok(self.store.interviews_by_application(application_id)?)
    }

    pub fn list_all(&self) -> Result<Vec<Interview>, PlacementError> {
        Ok(self.store.all_interviews()?)
    }

    fn open_application(&self, id: &ApplicationId) -> Result<Application, PlacementError> {
        let application = self
            .store
            .fetch_application(id)?
            .ok_or(PlacementError::NotFound("application"))?;
        if application.status.is_terminal() {
            return Err(PlacementError::NotFound("application"));
        }
        Ok(application)
    }
}
