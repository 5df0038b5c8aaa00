//! Project lifecycle transition rules.
//!
//! The state machine:
//!
//! ```text
//! draft ──────────► pending_review ──► open ──► in_progress ──► completed
//!   │                    │  ▲           │
//!   │                    ▼  │           │
//!   │                 rejected ─────────┘ (resubmit via edit)
//!   └──────────────► cancelled  (also from pending_review and open)
//! ```
//!
//! Company-posted projects enter at `pending_review` and need a university
//! decision; university-posted projects (and company posts to a university
//! with `auto_approve_projects` enabled) open immediately.

use crate::error::CoreError;
use crate::status::ProjectStatus;

/// Poster discriminant stored on every project.
pub const POSTER_COMPANY: &str = "company";
pub const POSTER_UNIVERSITY: &str = "university";

/// Review decision values for `POST /projects/{id}/review`.
pub const REVIEW_APPROVE: &str = "approve";
pub const REVIEW_REJECT: &str = "reject";

/// Initial status for a newly created project.
///
/// `auto_approve` reflects the owning university's `auto_approve_projects`
/// setting and only matters for company posts.
pub fn initial_status(posted_by_university: bool, auto_approve: bool) -> ProjectStatus {
    if posted_by_university || auto_approve {
        ProjectStatus::Open
    } else {
        ProjectStatus::PendingReview
    }
}

/// Whether a company may still edit its project.
///
/// Editing a rejected project resubmits it for review. University posters
/// are not status-gated.
pub fn company_may_edit(status: ProjectStatus) -> bool {
    matches!(status, ProjectStatus::Draft | ProjectStatus::Rejected)
}

/// Whether the project may be cancelled by its poster.
pub fn may_cancel(status: ProjectStatus) -> bool {
    matches!(
        status,
        ProjectStatus::Draft | ProjectStatus::PendingReview | ProjectStatus::Open
    )
}

/// Check that a university review decision is applicable.
///
/// Reviews only apply while the project is awaiting one.
pub fn check_reviewable(status: ProjectStatus) -> Result<(), CoreError> {
    if status == ProjectStatus::PendingReview {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Project is not pending review (status: {})",
            status.name()
        )))
    }
}

/// Validate a review decision string.
pub fn validate_review_decision(decision: &str) -> Result<(), String> {
    if decision == REVIEW_APPROVE || decision == REVIEW_REJECT {
        Ok(())
    } else {
        Err(format!(
            "Invalid decision '{decision}'. Must be one of: {REVIEW_APPROVE}, {REVIEW_REJECT}"
        ))
    }
}

/// Check that a project can accept applications.
pub fn check_open_for_applications(status: ProjectStatus) -> Result<(), CoreError> {
    if status == ProjectStatus::Open {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Project is not open for applications (status: {})",
            status.name()
        )))
    }
}

/// Check that a project can be marked completed by its poster.
pub fn check_completable(status: ProjectStatus) -> Result<(), CoreError> {
    if status == ProjectStatus::InProgress {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Only an in-progress project can be completed (status: {})",
            status.name()
        )))
    }
}
