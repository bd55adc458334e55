use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for placement users (students and recruiters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for scheduled interviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewId(pub String);

/// Role a user holds in the placement workflow. Fixed at enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Recruiter,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::Student => "STUDENT",
            UserRole::Recruiter => "RECRUITER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cumulative grade point average on the 0 to 10 scale the registrar reports.
/// Students without a recorded average still browse and apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cgpa {
    #[default]
    Unrecorded,
    Recorded(f32),
}

impl Cgpa {
    /// Value normalized to the 0 to 1 scale job requirements are expressed on.
    pub fn scaled(self) -> Option<f32> {
        match self {
            Cgpa::Recorded(value) => Some(value / 10.0),
            Cgpa::Unrecorded => None,
        }
    }
}

/// Minimum grade requirement a posting may carry, on the 0 to 1 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinCgpa {
    #[default]
    NotRequired,
    AtLeast(f32),
}

impl MinCgpa {
    pub fn threshold(self) -> Option<f32> {
        match self {
            MinCgpa::AtLeast(value) => Some(value),
            MinCgpa::NotRequired => None,
        }
    }
}

/// Role-specific profile data carried by a user record. The variant doubles as
/// the role discriminant, so a profile update can never change a user's role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleProfile {
    Student(StudentProfile),
    Recruiter(RecruiterProfile),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub department: String,
    #[serde(default)]
    pub cgpa: Cgpa,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterProfile {
    pub company_name: String,
    pub designation: String,
}

/// A registered participant in the placement workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub profile: RoleProfile,
}

impl User {
    pub fn role(&self) -> UserRole {
        match self.profile {
            RoleProfile::Student(_) => UserRole::Student,
            RoleProfile::Recruiter(_) => UserRole::Recruiter,
        }
    }

    /// Recorded grade average, if any. Recruiters never carry one.
    pub fn cgpa(&self) -> Cgpa {
        match &self.profile {
            RoleProfile::Student(profile) => profile.cgpa,
            RoleProfile::Recruiter(_) => Cgpa::Unrecorded,
        }
    }
}

/// Whether a posting is open for new applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Active,
    Closed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Active => "ACTIVE",
            JobStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recruiter's job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub posted_by: UserId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub min_cgpa: MinCgpa,
    pub status: JobStatus,
}

/// Lifecycle states of an application.
///
/// The workflow is a strict chain with withdrawal reachable from every
/// non-terminal state:
/// SUBMITTED -> UNDER_REVIEW -> INTERVIEW -> OFFERED | REJECTED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Interview,
    Offered,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "SUBMITTED",
            ApplicationStatus::UnderReview => "UNDER_REVIEW",
            ApplicationStatus::Interview => "INTERVIEW",
            ApplicationStatus::Offered => "OFFERED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }

    /// Terminal states accept no further transitions, self-transitions included.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Offered | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }

    /// Adjacency table for the application state machine.
    pub const fn permits(self, next: ApplicationStatus) -> bool {
        match self {
            ApplicationStatus::Submitted => matches!(
                next,
                ApplicationStatus::UnderReview | ApplicationStatus::Withdrawn
            ),
            ApplicationStatus::UnderReview => matches!(
                next,
                ApplicationStatus::Interview | ApplicationStatus::Withdrawn
            ),
            ApplicationStatus::Interview => matches!(
                next,
                ApplicationStatus::Offered
                    | ApplicationStatus::Rejected
                    | ApplicationStatus::Withdrawn
            ),
            ApplicationStatus::Offered
            | ApplicationStatus::Rejected
            | ApplicationStatus::Withdrawn => false,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A student's application against a posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub student_id: UserId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Withdrawn applications do not block a fresh application to the same job.
    pub fn blocks_reapplication_to(&self, job_id: &JobId) -> bool {
        self.job_id == *job_id && self.status != ApplicationStatus::Withdrawn
    }
}

/// Scheduling states of an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "SCHEDULED",
            InterviewStatus::Completed => "COMPLETED",
            InterviewStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recorded outcome of an interview round. Meaningful once the interview is
/// COMPLETED; a completed interview left PENDING is a tolerated intermediate
/// state the panel resolves later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewResult {
    #[default]
    Pending,
    Passed,
    Failed,
}

impl InterviewResult {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewResult::Pending => "PENDING",
            InterviewResult::Passed => "PASSED",
            InterviewResult::Failed => "FAILED",
        }
    }
}

impl fmt::Display for InterviewResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One interview round attached to an application. Round labels are
/// free text supplied by the scheduling recruiter (Technical, HR, Managerial).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub application_id: ApplicationId,
    pub round: String,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
    pub status: InterviewStatus,
    #[serde(default)]
    pub result: InterviewResult,
    #[serde(default)]
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}
