//! Project model and DTOs.

use chrono::NaiveDate;
use internhub_core::eligibility::Eligibility;
use internhub_core::tags::parse_tags;
use internhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `projects` table. Tag columns stay comma-joined here;
/// use [`Project::into_view`] for API responses.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: DbId,
    pub poster_type: String,
    pub company_id: Option<DbId>,
    pub university_id: DbId,
    pub posted_by_university: bool,
    pub title: String,
    pub domain: String,
    pub description: String,
    pub required_skills: String,
    pub team_type: String,
    pub team_size: i32,
    pub job_type: String,
    pub eligible_departments: String,
    pub min_gpa: Option<f64>,
    pub eligible_years: String,
    pub payment_amount: f64,
    pub payment_type: String,
    pub duration_weeks: i32,
    pub deadline: NaiveDate,
    pub status_id: i16,
    pub rejection_reason: String,
    pub attachment_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub submitted_for_review_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

/// API view of a project with tag columns expanded to ordered lists.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: DbId,
    pub poster_type: String,
    pub company_id: Option<DbId>,
    pub university_id: DbId,
    pub posted_by_university: bool,
    pub title: String,
    pub domain: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub team_type: String,
    pub team_size: i32,
    pub job_type: String,
    pub eligible_departments: Vec<String>,
    pub min_gpa: Option<f64>,
    pub eligible_years: Vec<String>,
    pub payment_amount: f64,
    pub payment_type: String,
    pub duration_weeks: i32,
    pub deadline: NaiveDate,
    pub status_id: i16,
    pub rejection_reason: String,
    pub attachment_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub submitted_for_review_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl Project {
    /// Convert to the API view, parsing comma-joined tag columns.
    pub fn into_view(self) -> ProjectView {
        ProjectView {
            id: self.id,
            poster_type: self.poster_type,
            company_id: self.company_id,
            university_id: self.university_id,
            posted_by_university: self.posted_by_university,
            title: self.title,
            domain: self.domain,
            description: self.description,
            required_skills: parse_tags(&self.required_skills),
            team_type: self.team_type,
            team_size: self.team_size,
            job_type: self.job_type,
            eligible_departments: parse_tags(&self.eligible_departments),
            min_gpa: self.min_gpa,
            eligible_years: parse_tags(&self.eligible_years),
            payment_amount: self.payment_amount,
            payment_type: self.payment_type,
            duration_weeks: self.duration_weeks,
            deadline: self.deadline,
            status_id: self.status_id,
            rejection_reason: self.rejection_reason,
            attachment_path: self.attachment_path,
            created_at: self.created_at,
            updated_at: self.updated_at,
            submitted_for_review_at: self.submitted_for_review_at,
            approved_at: self.approved_at,
            completed_at: self.completed_at,
        }
    }

    /// The advisory eligibility criteria for listing filters.
    pub fn eligibility(&self) -> Eligibility {
        Eligibility {
            departments: parse_tags(&self.eligible_departments),
            years: parse_tags(&self.eligible_years),
            min_gpa: self.min_gpa,
        }
    }
}

/// Request body for creating a project. Poster identity and initial status
/// are derived from the authenticated actor, never from the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    /// Target university. Ignored for university posters (their own id is
    /// used); required for company posters.
    pub university_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub domain: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub required_skills: Vec<String>,
    pub team_type: Option<String>,
    #[validate(range(min = 1))]
    pub team_size: Option<i32>,
    pub job_type: Option<String>,
    pub eligible_departments: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub min_gpa: Option<f64>,
    pub eligible_years: Option<Vec<String>>,
    #[validate(range(min = 0.0))]
    pub payment_amount: f64,
    pub payment_type: Option<String>,
    #[validate(range(min = 1))]
    pub duration_weeks: i32,
    pub deadline: NaiveDate,
    pub attachment_path: Option<String>,
}

/// Request body for editing a project (status-gated for company posters).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub team_type: Option<String>,
    #[validate(range(min = 1))]
    pub team_size: Option<i32>,
    pub job_type: Option<String>,
    pub eligible_departments: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub min_gpa: Option<f64>,
    pub eligible_years: Option<Vec<String>>,
    #[validate(range(min = 0.0))]
    pub payment_amount: Option<f64>,
    pub payment_type: Option<String>,
    #[validate(range(min = 1))]
    pub duration_weeks: Option<i32>,
    pub deadline: Option<NaiveDate>,
    pub attachment_path: Option<String>,
}

/// Listing filters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListQuery {
    pub domain: Option<String>,
    pub university_id: Option<DbId>,
    pub search: Option<String>,
    pub min_payment: Option<f64>,
    pub max_payment: Option<f64>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
