//! Student profile model.

use internhub_core::tags::parse_tags;
use internhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `students` table. Tag columns stay comma-joined here;
/// use [`Student::into_view`] for API responses.
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: DbId,
    pub user_id: DbId,
    pub university_id: Option<DbId>,
    pub student_number: String,
    pub department: String,
    pub year: String,
    pub gpa: Option<f64>,
    pub bio: String,
    pub profile_picture_path: Option<String>,
    pub resume_path: Option<String>,
    pub portfolio_url: String,
    pub skills: String,
    pub preferred_domains: String,
    pub projects_completed: i32,
    pub rating: f64,
    pub total_earned: f64,
    pub available_for_projects: bool,
    pub is_verified: bool,
    pub verification_status_id: i16,
    pub university_email: String,
    pub rejection_reason: String,
    pub verified_by: Option<DbId>,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// API view of a student with tag columns expanded to ordered lists.
#[derive(Debug, Clone, Serialize)]
pub struct StudentView {
    pub id: DbId,
    pub user_id: DbId,
    pub university_id: Option<DbId>,
    pub student_number: String,
    pub department: String,
    pub year: String,
    pub gpa: Option<f64>,
    pub bio: String,
    pub profile_picture_path: Option<String>,
    pub resume_path: Option<String>,
    pub portfolio_url: String,
    pub skills: Vec<String>,
    pub preferred_domains: Vec<String>,
    pub projects_completed: i32,
    pub rating: f64,
    pub total_earned: f64,
    pub available_for_projects: bool,
    pub is_verified: bool,
    pub verification_status_id: i16,
    pub university_email: String,
    pub rejection_reason: String,
    pub verified_by: Option<DbId>,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Student {
    /// Convert to the API view, parsing comma-joined tag columns.
    pub fn into_view(self) -> StudentView {
        StudentView {
            id: self.id,
            user_id: self.user_id,
            university_id: self.university_id,
            student_number: self.student_number,
            department: self.department,
            year: self.year,
            gpa: self.gpa,
            bio: self.bio,
            profile_picture_path: self.profile_picture_path,
            resume_path: self.resume_path,
            portfolio_url: self.portfolio_url,
            skills: parse_tags(&self.skills),
            preferred_domains: parse_tags(&self.preferred_domains),
            projects_completed: self.projects_completed,
            rating: self.rating,
            total_earned: self.total_earned,
            available_for_projects: self.available_for_projects,
            is_verified: self.is_verified,
            verification_status_id: self.verification_status_id,
            university_email: self.university_email,
            rejection_reason: self.rejection_reason,
            verified_by: self.verified_by,
            verified_at: self.verified_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for a student updating their own profile.
///
/// Completing the academic block (university, student number, university
/// email) re-enters the verification queue when not already verified.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStudentProfile {
    pub university_id: Option<DbId>,
    #[validate(length(max = 50))]
    pub student_number: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub gpa: Option<f64>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub skills: Option<Vec<String>>,
    pub preferred_domains: Option<Vec<String>>,
    pub available_for_projects: Option<bool>,
    #[validate(email)]
    pub university_email: Option<String>,
    pub resume_path: Option<String>,
    pub profile_picture_path: Option<String>,
}
