//! Company profile model.

use internhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `companies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub industry: String,
    pub website: String,
    pub description: String,
    pub logo_path: Option<String>,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub registration_number: String,
    pub gst_number: String,
    pub is_verified: bool,
    pub verification_status_id: i16,
    pub verified_by: Option<DbId>,
    pub verification_document_path: Option<String>,
    pub rejection_reason: String,
    pub verified_at: Option<Timestamp>,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a company updating its own profile.
///
/// Completing the verification block (contact person/email, registration
/// number, document) re-enters the verification queue when not already
/// verified.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCompanyProfile {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub contact_person: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub registration_number: Option<String>,
    pub gst_number: Option<String>,
    pub verification_document_path: Option<String>,
    pub logo_path: Option<String>,
}
