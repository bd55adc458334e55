//! Campus placement workflow: eligibility gating, the application state
//! machine, and interview scheduling with outcome routing.
//!
//! The lifecycle services are the only writers of application status and
//! interview results; HTTP handlers and the CLI only pass validated target
//! values through them. Storage sits behind the repository traits so the
//! same services run against the in-memory store here or a durable one.

pub mod applications;
pub mod directory;
pub mod domain;
pub mod eligibility;
pub mod errors;
pub mod interviews;
pub mod jobs;
pub mod memory;
pub mod repository;
pub mod router;

#[cfg(test)]
mod tests;

pub use applications::ApplicationLifecycle;
pub use directory::{ProfileUpdate, UserDirectory};
pub use domain::{
    Application, ApplicationId, ApplicationStatus, Cgpa, Interview, InterviewId, InterviewResult,
    InterviewStatus, Job, JobId, JobStatus, MinCgpa, RecruiterProfile, RoleProfile,
    StudentProfile, User, UserId, UserRole,
};
pub use eligibility::{evaluate, Eligibility, IneligibilityReason};
pub use errors::PlacementError;
pub use interviews::{InterviewLifecycle, InterviewUpdate, ScheduleRequest};
pub use jobs::{JobBoard, JobPosting};
pub use memory::MemoryRecordStore;
pub use repository::{
    ApplicationRepository, InterviewRepository, JobRepository, PlacementRecordStore,
    RepositoryError, UserRepository,
};
pub use router::{placement_router, PlacementServices};
