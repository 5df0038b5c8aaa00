//! Verification decision constants and validation functions.
//!
//! Universities verify student and company profiles. The decision values and
//! the completeness preconditions live here so the DB and API layers share
//! one definition.

use crate::error::CoreError;
use crate::types::DbId;

/// Profile was approved; the owner gains full platform access.
pub const DECISION_APPROVE: &str = "approve";

/// Profile was rejected; a reason is recorded.
pub const DECISION_REJECT: &str = "reject";

/// All valid verification decision values.
pub const VALID_DECISIONS: &[&str] = &[DECISION_APPROVE, DECISION_REJECT];

/// Reason text recorded when a rejection arrives without one.
pub const DEFAULT_REJECTION_REASON: &str = "No reason provided";

/// Validate that a decision string is one of the accepted values.
pub fn validate_decision(decision: &str) -> Result<(), String> {
    if VALID_DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(format!(
            "Invalid decision '{decision}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        ))
    }
}

/// Fields a student must have filled in before a university may approve them.
///
/// An approved student with a missing university, student id, or university
/// email would violate the dashboard access invariant, so approval is blocked
/// up front.
pub struct StudentCompleteness<'a> {
    pub university_id: Option<DbId>,
    pub student_number: &'a str,
    pub university_email: &'a str,
}

/// Check that a student profile is complete enough to be approved.
pub fn check_student_approvable(profile: &StudentCompleteness<'_>) -> Result<(), CoreError> {
    if profile.university_id.is_none() {
        return Err(CoreError::Validation(
            "Student has not selected a university".to_string(),
        ));
    }
    if profile.student_number.trim().is_empty() {
        return Err(CoreError::Validation(
            "Student id is required for verification".to_string(),
        ));
    }
    if profile.university_email.trim().is_empty() {
        return Err(CoreError::Validation(
            "University email is required for verification".to_string(),
        ));
    }
    Ok(())
}

/// Check that the acting university owns the student relationship.
///
/// Company verification has no such binding: any university may review a
/// company, so there is no company counterpart to this check.
pub fn check_student_verifier(
    student_university_id: Option<DbId>,
    actor_university_id: DbId,
) -> Result<(), CoreError> {
    match student_university_id {
        Some(id) if id == actor_university_id => Ok(()),
        _ => Err(CoreError::Forbidden(
            "Only the student's own university may verify them".to_string(),
        )),
    }
}

/// Resolve the rejection reason to record, falling back to the default.
pub fn rejection_reason(given: Option<&str>) -> String {
    match given {
        Some(reason) if !reason.trim().is_empty() => reason.to_string(),
        _ => DEFAULT_REJECTION_REASON.to_string(),
    }
}
