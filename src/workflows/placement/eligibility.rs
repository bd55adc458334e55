use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{Application, Job, JobStatus, User};

/// Why a student may not apply to a job right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IneligibilityReason {
    JobClosed,
    CgpaTooLow,
    AlreadyApplied,
}

impl IneligibilityReason {
    pub const fn label(self) -> &'static str {
        match self {
            IneligibilityReason::JobClosed => "JOB_CLOSED",
            IneligibilityReason::CgpaTooLow => "CGPA_TOO_LOW",
            IneligibilityReason::AlreadyApplied => "ALREADY_APPLIED",
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of an eligibility check. Advisory only; creating the application
/// re-runs the same check against fresh records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Ineligible(IneligibilityReason),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn reason(&self) -> Option<IneligibilityReason> {
        match self {
            Eligibility::Ineligible(reason) => Some(*reason),
            Eligibility::Eligible => None,
        }
    }
}

/// Decide whether `student` may apply to `job`, given the student's existing
/// applications. Rules apply in order and the first failure wins:
///
/// 1. the posting must be ACTIVE;
/// 2. a recorded grade average, scaled to 0..1, must meet the posting's
///    minimum when one is set (an unrecorded average passes the rule);
/// 3. no prior non-withdrawn application against the same posting.
pub fn evaluate(student: &User, job: &Job, existing: &[Application]) -> Eligibility {
    if job.status != JobStatus::Active {
        return Eligibility::Ineligible(IneligibilityReason::JobClosed);
    }

    if let (Some(required), Some(scaled)) = (job.min_cgpa.threshold(), student.cgpa().scaled()) {
        if scaled < required {
            return Eligibility::Ineligible(IneligibilityReason::CgpaTooLow);
        }
    }

    if existing
        .iter()
        .any(|application| application.blocks_reapplication_to(&job.id))
    {
        return Eligibility::Ineligible(IneligibilityReason::AlreadyApplied);
    }

    Eligibility::Eligible
}
