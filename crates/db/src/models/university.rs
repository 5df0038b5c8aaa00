//! University profile model.

use internhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `universities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct University {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub address: String,
    pub website: String,
    pub description: String,
    pub logo_path: Option<String>,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_phone: String,
    pub is_verified: bool,
    pub auto_approve_projects: bool,
    pub min_payment_amount: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a university updating its own profile and settings.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUniversityProfile {
    pub name: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub admin_name: Option<String>,
    #[validate(email)]
    pub admin_email: Option<String>,
    pub admin_phone: Option<String>,
    pub auto_approve_projects: Option<bool>,
    #[validate(range(min = 0.0))]
    pub min_payment_amount: Option<f64>,
    pub logo_path: Option<String>,
}
