use super::domain::ApplicationStatus;
use super::eligibility::IneligibilityReason;
use super::repository::RepositoryError;

/// Typed failures raised by the placement lifecycle services.
///
/// `Conflict` marks a uniqueness or compare-and-set violation detected at
/// commit time despite a passing pre-check; on application creation the HTTP
/// contract reports it exactly like `Ineligible(AlreadyApplied)`. Nothing
/// here is retried by the services themselves.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("student is ineligible for this job: {0}")]
    Ineligible(IneligibilityReason),
    #[error("application status change {from} -> {to} is not permitted")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("a concurrent write already claimed this record")]
    Conflict,
    #[error(transparent)]
    Store(RepositoryError),
}

impl From<RepositoryError> for PlacementError {
    /// Fallback mapping for plain reads and writes. Call sites that can name
    /// the missing entity or expect commit-time conflicts match on the store
    /// error themselves instead of going through this.
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Conflict => PlacementError::Conflict,
            RepositoryError::NotFound => PlacementError::NotFound("record"),
            unavailable => PlacementError::Store(unavailable),
        }
    }
}
