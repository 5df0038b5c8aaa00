//! Deliverable model and DTOs.

use internhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `deliverables` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deliverable {
    pub id: DbId,
    pub project_id: DbId,
    pub student_id: DbId,
    pub milestone_id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub file_path: String,
    pub submission_notes: String,
    pub is_approved: bool,
    pub revision_required: bool,
    pub feedback: String,
    pub submitted_at: Timestamp,
    pub reviewed_at: Option<Timestamp>,
}

/// Request body for `POST /projects/{id}/deliverables`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDeliverable {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Opaque storage reference; uploads are handled by an external
    /// collaborator.
    #[validate(length(min = 1))]
    pub file_path: String,
    pub submission_notes: Option<String>,
    pub milestone_id: Option<DbId>,
}

/// Request body for `POST /deliverables/{id}/review`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDeliverableRequest {
    /// One of `approve`, `revision`.
    pub action: String,
    pub feedback: Option<String>,
}
