//! Milestone aggregation and progress math.
//!
//! A milestone's status is derived from the review state of its linked
//! deliverables: it becomes approved once every linked deliverable is
//! approved, and a revision request on any of them downgrades it to
//! revision required. Aggregation is recomputed at review time only, never
//! on deliverable creation, so a new unreviewed deliverable does not reopen
//! an already-approved milestone.

use crate::status::MilestoneStatus;

/// Deliverable review action: mark approved.
pub const REVIEW_APPROVE: &str = "approve";

/// Deliverable review action: request revision.
pub const REVIEW_REVISION: &str = "revision";

/// All valid deliverable review actions.
pub const VALID_REVIEW_ACTIONS: &[&str] = &[REVIEW_APPROVE, REVIEW_REVISION];

/// Validate that a review action string is one of the accepted values.
pub fn validate_review_action(action: &str) -> Result<(), String> {
    if VALID_REVIEW_ACTIONS.contains(&action) {
        Ok(())
    } else {
        Err(format!(
            "Invalid action '{action}'. Must be one of: {}",
            VALID_REVIEW_ACTIONS.join(", ")
        ))
    }
}

/// Validate a milestone payment percentage (0–100 inclusive).
pub fn validate_payment_percentage(pct: f64) -> Result<(), String> {
    if (0.0..=100.0).contains(&pct) {
        Ok(())
    } else {
        Err(format!(
            "payment_percentage must be between 0 and 100, got {pct}"
        ))
    }
}

/// Recompute a milestone's status after a deliverable approval.
///
/// Returns `Some(Approved)` iff every deliverable currently linked to the
/// milestone is approved, `None` when the milestone should keep its status.
/// The deliverable set may still be growing; the caller recomputes on every
/// approval rather than caching the verdict.
pub fn status_after_approval(deliverable_approvals: &[bool]) -> Option<MilestoneStatus> {
    if !deliverable_approvals.is_empty() && deliverable_approvals.iter().all(|&a| a) {
        Some(MilestoneStatus::Approved)
    } else {
        None
    }
}

/// Milestone status after a revision request on any linked deliverable.
///
/// A single revision request downgrades the whole milestone regardless of
/// the other deliverables' state.
pub fn status_after_revision() -> MilestoneStatus {
    MilestoneStatus::RevisionRequired
}

/// Project progress as a percentage of approved milestones.
///
/// Defined as 0 when the project has no milestones.
pub fn progress_percentage(approved: i64, total: i64) -> f64 {
    if total <= 0 {
        0.0
    } else {
        approved as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_action_values() {
        assert!(validate_review_action(REVIEW_APPROVE).is_ok());
        assert!(validate_review_action(REVIEW_REVISION).is_ok());
        assert!(validate_review_action("reject").is_err());
    }

    #[test]
    fn test_payment_percentage_bounds() {
        assert!(validate_payment_percentage(0.0).is_ok());
        assert!(validate_payment_percentage(100.0).is_ok());
        assert!(validate_payment_percentage(33.33).is_ok());
        assert!(validate_payment_percentage(-0.1).is_err());
        assert!(validate_payment_percentage(100.1).is_err());
    }

    #[test]
    fn test_all_approved_completes_milestone() {
        assert_eq!(
            status_after_approval(&[true, true, true]),
            Some(MilestoneStatus::Approved)
        );
    }

    #[test]
    fn test_partial_approval_keeps_status() {
        assert_eq!(status_after_approval(&[true, false]), None);
    }

    #[test]
    fn test_empty_deliverable_set_keeps_status() {
        assert_eq!(status_after_approval(&[]), None);
    }

    #[test]
    fn test_revision_downgrades_unconditionally() {
        assert_eq!(status_after_revision(), MilestoneStatus::RevisionRequired);
    }

    #[test]
    fn test_progress_zero_without_milestones() {
        assert_eq!(progress_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_progress_ratio() {
        assert_eq!(progress_percentage(1, 4), 25.0);
        assert_eq!(progress_percentage(4, 4), 100.0);
    }
}
