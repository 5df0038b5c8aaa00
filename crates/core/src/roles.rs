//! Well-known role name constants.
//!
//! These must match the `role` column values seeded by the users migration.

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_COMPANY: &str = "company";
pub const ROLE_UNIVERSITY: &str = "university";

/// All valid role values, in registration-form order.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_COMPANY, ROLE_UNIVERSITY];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
