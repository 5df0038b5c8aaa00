//! Project application model and DTOs.

use internhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `project_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub project_id: DbId,
    pub student_id: DbId,
    pub cover_letter: String,
    pub proposed_approach: String,
    pub portfolio_links: String,
    pub is_team_application: bool,
    pub status_id: i16,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /projects/{id}/apply`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplication {
    #[validate(length(min = 1))]
    pub cover_letter: String,
    pub proposed_approach: Option<String>,
    pub portfolio_links: Option<String>,
    pub is_team_application: Option<bool>,
    /// Additional students on a team application.
    pub team_member_ids: Option<Vec<DbId>>,
}

/// Request body for `POST /applications/{id}/act`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationActionRequest {
    /// One of `accept`, `reject`, `shortlist`.
    pub action: String,
}

/// Per-status counters for an application list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationCounts {
    pub total: i64,
    pub pending: i64,
    pub shortlisted: i64,
    pub accepted: i64,
    pub rejected: i64,
}
