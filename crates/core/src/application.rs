//! Application action constants and validation.
//!
//! A reviewer (the project's poster) acts on pending applications. Accepting
//! staffs the project; the staffing side effects live in the application
//! repository so they share one transaction.

use crate::status::ApplicationStatus;

/// Accept the application and staff the student onto the project.
pub const ACTION_ACCEPT: &str = "accept";

/// Reject the application.
pub const ACTION_REJECT: &str = "reject";

/// Shortlist the application for a later decision.
pub const ACTION_SHORTLIST: &str = "shortlist";

/// All valid reviewer actions.
pub const VALID_ACTIONS: &[&str] = &[ACTION_ACCEPT, ACTION_REJECT, ACTION_SHORTLIST];

/// Validate that an action string is one of the accepted values.
pub fn validate_action(action: &str) -> Result<(), String> {
    if VALID_ACTIONS.contains(&action) {
        Ok(())
    } else {
        Err(format!(
            "Invalid action '{action}'. Must be one of: {}",
            VALID_ACTIONS.join(", ")
        ))
    }
}

/// Target status for a reviewer action.
pub fn action_target_status(action: &str) -> Option<ApplicationStatus> {
    match action {
        ACTION_ACCEPT => Some(ApplicationStatus::Accepted),
        ACTION_REJECT => Some(ApplicationStatus::Rejected),
        ACTION_SHORTLIST => Some(ApplicationStatus::Shortlisted),
        _ => None,
    }
}

/// Whether an application in this status may still be acted on.
///
/// Accepted and withdrawn applications are terminal; a shortlisted one may
/// still be accepted or rejected.
pub fn is_actionable(status: ApplicationStatus) -> bool {
    matches!(
        status,
        ApplicationStatus::Pending | ApplicationStatus::Shortlisted
    )
}
