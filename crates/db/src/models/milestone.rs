//! Milestone model and DTOs.

use chrono::NaiveDate;
use internhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
    pub payment_percentage: f64,
    pub due_date: NaiveDate,
    pub completed_at: Option<Timestamp>,
    pub status_id: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a milestone. `sort_order` is assigned by the
/// repository (max + 1), never by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMilestone {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub payment_percentage: Option<f64>,
    pub due_date: NaiveDate,
}

/// Request body for editing a milestone.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMilestone {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub payment_percentage: Option<f64>,
    pub due_date: Option<NaiveDate>,
}
