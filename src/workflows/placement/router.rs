use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::applications::ApplicationLifecycle;
use super::directory::{ProfileUpdate, UserDirectory};
use super::domain::{ApplicationId, ApplicationStatus, InterviewId, JobId, JobStatus, UserId, UserRole};
use super::eligibility::IneligibilityReason;
use super::errors::PlacementError;
use super::interviews::{InterviewLifecycle, InterviewUpdate, ScheduleRequest};
use super::jobs::{JobBoard, JobPosting};
use super::repository::PlacementRecordStore;

/// Service handles shared by the HTTP handlers.
pub struct PlacementServices<S> {
    pub applications: Arc<ApplicationLifecycle<S>>,
    pub interviews: Arc<InterviewLifecycle<S>>,
    pub jobs: Arc<JobBoard<S>>,
    pub directory: Arc<UserDirectory<S>>,
}

impl<S> PlacementServices<S>
where
    S: PlacementRecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        let applications = Arc::new(ApplicationLifecycle::new(store.clone()));
        let interviews = Arc::new(InterviewLifecycle::new(store.clone(), applications.clone()));
        let jobs = Arc::new(JobBoard::new(store.clone()));
        let directory = Arc::new(UserDirectory::new(store));
        Self {
            applications,
            interviews,
            jobs,
            directory,
        }
    }
}

impl<S> Clone for PlacementServices<S> {
    fn clone(&self) -> Self {
        Self {
            applications: self.applications.clone(),
            interviews: self.interviews.clone(),
            jobs: self.jobs.clone(),
            directory: self.directory.clone(),
        }
    }
}

/// Router builder exposing the placement workflow over HTTP.
pub fn placement_router<S>(services: PlacementServices<S>) -> Router
where
    S: PlacementRecordStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/placement/applications",
            post(create_application::<S>).get(list_applications::<S>),
        )
        .route(
            "/api/v1/placement/applications/check-eligibility",
            get(check_eligibility::<S>),
        )
        .route(
            "/api/v1/placement/applications/:id",
            get(application_by_id::<S>),
        )
        .route(
            "/api/v1/placement/applications/:id/status",
            put(change_application_status::<S>),
        )
        .route(
            "/api/v1/placement/applications/student/:student_id",
            get(applications_by_student::<S>),
        )
        .route(
            "/api/v1/placement/applications/job/:job_id",
            get(applications_by_job::<S>),
        )
        .route(
            "/api/v1/placement/interviews",
            post(schedule_interview::<S>).get(list_interviews::<S>),
        )
        .route(
            "/api/v1/placement/interviews/:id",
            get(interview_by_id::<S>).put(update_interview::<S>),
        )
        .route(
            "/api/v1/placement/interviews/application/:application_id",
            get(interviews_by_application::<S>),
        )
        .route(
            "/api/v1/placement/jobs",
            post(post_job::<S>).get(active_jobs::<S>),
        )
        .route("/api/v1/placement/jobs/:id", get(job_by_id::<S>))
        .route("/api/v1/placement/jobs/:id/status", put(change_job_status::<S>))
        .route(
            "/api/v1/placement/jobs/recruiter/:recruiter_id",
            get(jobs_by_recruiter::<S>),
        )
        .route(
            "/api/v1/placement/users/:id",
            get(user_by_id::<S>).put(update_user_profile::<S>),
        )
        .route("/api/v1/placement/users/by-role/:role", get(users_by_role::<S>))
        .with_state(services)
}

fn error_response(error: PlacementError) -> Response {
    let status = match &error {
        PlacementError::NotFound(_) => StatusCode::NOT_FOUND,
        PlacementError::Ineligible(IneligibilityReason::AlreadyApplied)
        | PlacementError::Conflict
        | PlacementError::InvalidTransition { .. } => StatusCode::CONFLICT,
        PlacementError::Ineligible(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PlacementError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = match &error {
        PlacementError::Ineligible(reason) => json!({
            "error": error.to_string(),
            "reason": reason.label(),
        }),
        other => json!({ "error": other.to_string() }),
    };

    (status, Json(payload)).into_response()
}

#[derive(Debug, Deserialize)]
struct ApplicationRequest {
    student_id: UserId,
    job_id: JobId,
}

async fn create_application<S>(
    State(services): State<PlacementServices<S>>,
    Json(request): Json<ApplicationRequest>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services
        .applications
        .create(&request.student_id, &request.job_id)
    {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        // A commit-time duplicate reads the same as a pre-checked one.
        Err(PlacementError::Conflict) => error_response(PlacementError::Ineligible(
            IneligibilityReason::AlreadyApplied,
        )),
        Err(other) => error_response(other),
    }
}

async fn list_applications<S>(State(services): State<PlacementServices<S>>) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.applications.list_all() {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn application_by_id<S>(
    State(services): State<PlacementServices<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.applications.get(&ApplicationId(id)) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn applications_by_student<S>(
    State(services): State<PlacementServices<S>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.applications.by_student(&UserId(student_id)) {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn applications_by_job<S>(
    State(services): State<PlacementServices<S>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.applications.by_job(&JobId(job_id)) {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
struct EligibilityQuery {
    student_id: UserId,
    job_id: JobId,
}

#[derive(Debug, Serialize)]
struct EligibilityView {
    eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

async fn check_eligibility<S>(
    State(services): State<PlacementServices<S>>,
    Query(query): Query<EligibilityQuery>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services
        .applications
        .check_eligibility(&query.student_id, &query.job_id)
    {
        Ok(eligibility) => (
            StatusCode::OK,
            Json(EligibilityView {
                eligible: eligibility.is_eligible(),
                reason: eligibility.reason().map(|reason| reason.label()),
            }),
        )
            .into_response(),
        // An unknown student or job was never eligible to begin with.
        Err(PlacementError::NotFound(_)) => (
            StatusCode::OK,
            Json(EligibilityView {
                eligible: false,
                reason: None,
            }),
        )
            .into_response(),
        Err(other) => error_response(other),
    }
}

#[derive(Debug, Deserialize)]
struct StatusChangeRequest {
    status: ApplicationStatus,
}

async fn change_application_status<S>(
    State(services): State<PlacementServices<S>>,
    Path(id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services
        .applications
        .set_status(&ApplicationId(id), request.status)
    {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn schedule_interview<S>(
    State(services): State<PlacementServices<S>>,
    Json(request): Json<ScheduleRequest>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.interviews.schedule(
        &request.application_id,
        request.round,
        request.scheduled_at,
        request.location,
    ) {
        Ok(interview) => (StatusCode::CREATED, Json(interview)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_interviews<S>(State(services): State<PlacementServices<S>>) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.interviews.list_all() {
        Ok(interviews) => (StatusCode::OK, Json(interviews)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn interview_by_id<S>(
    State(services): State<PlacementServices<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.interviews.get(&InterviewId(id)) {
        Ok(interview) => (StatusCode::OK, Json(interview)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn update_interview<S>(
    State(services): State<PlacementServices<S>>,
    Path(id): Path<String>,
    Json(update): Json<InterviewUpdate>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.interviews.update(&InterviewId(id), update) {
        Ok(interview) => (StatusCode::OK, Json(interview)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn interviews_by_application<S>(
    State(services): State<PlacementServices<S>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services
        .interviews
        .by_application(&ApplicationId(application_id))
    {
        Ok(interviews) => (StatusCode::OK, Json(interviews)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn post_job<S>(
    State(services): State<PlacementServices<S>>,
    Json(posting): Json<JobPosting>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.jobs.post(posting) {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn active_jobs<S>(State(services): State<PlacementServices<S>>) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.jobs.active() {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn job_by_id<S>(
    State(services): State<PlacementServices<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.jobs.get(&JobId(id)) {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
struct JobStatusRequest {
    status: JobStatus,
}

async fn change_job_status<S>(
    State(services): State<PlacementServices<S>>,
    Path(id): Path<String>,
    Json(request): Json<JobStatusRequest>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.jobs.set_status(&JobId(id), request.status) {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn jobs_by_recruiter<S>(
    State(services): State<PlacementServices<S>>,
    Path(recruiter_id): Path<String>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.jobs.by_recruiter(&UserId(recruiter_id)) {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn user_by_id<S>(
    State(services): State<PlacementServices<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.directory.get(&UserId(id)) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn users_by_role<S>(
    State(services): State<PlacementServices<S>>,
    Path(role): Path<UserRole>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.directory.by_role(role) {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn update_user_profile<S>(
    State(services): State<PlacementServices<S>>,
    Path(id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Response
where
    S: PlacementRecordStore + 'static,
{
    match services.directory.update_profile(&UserId(id), update) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}
