//! Repository for the `companies` table, including verification transitions.

use internhub_core::status::VerificationStatus;
use internhub_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::company::{Company, UpdateCompanyProfile};

/// Column list for `companies` queries.
const COLUMNS: &str = "\
    id, user_id, name, industry, website, description, logo_path, \
    contact_person, contact_email, contact_phone, address, \
    registration_number, gst_number, is_verified, verification_status_id, \
    verified_by, verification_document_path, rejection_reason, verified_at, \
    rating, created_at, updated_at";

/// Provides CRUD and verification operations for company profiles.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Create the empty profile skeleton at registration, in the same
    /// transaction as the user insert.
    pub async fn create_skeleton(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Company, sqlx::Error> {
        let query = format!("INSERT INTO companies (user_id) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Company>(&query)
            .bind(user_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE user_id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the company's own profile. Unverified companies re-enter the
    /// `pending` verification queue on update.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompanyProfile,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                name = COALESCE($2, name),
                industry = COALESCE($3, industry),
                website = COALESCE($4, website),
                description = COALESCE($5, description),
                contact_person = COALESCE($6, contact_person),
                contact_email = COALESCE($7, contact_email),
                contact_phone = COALESCE($8, contact_phone),
                address = COALESCE($9, address),
                registration_number = COALESCE($10, registration_number),
                gst_number = COALESCE($11, gst_number),
                verification_document_path = COALESCE($12, verification_document_path),
                logo_path = COALESCE($13, logo_path),
                verification_status_id = CASE
                    WHEN is_verified THEN verification_status_id
                    ELSE $14
                END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.industry.as_deref())
            .bind(input.website.as_deref())
            .bind(input.description.as_deref())
            .bind(input.contact_person.as_deref())
            .bind(input.contact_email.as_deref())
            .bind(input.contact_phone.as_deref())
            .bind(input.address.as_deref())
            .bind(input.registration_number.as_deref())
            .bind(input.gst_number.as_deref())
            .bind(input.verification_document_path.as_deref())
            .bind(input.logo_path.as_deref())
            .bind(VerificationStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// List companies for the verification queue, optionally filtered by
    /// verification status. Companies are not scoped to one university, so
    /// every university sees the same queue.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies \
             WHERE ($1::SMALLINT IS NULL OR verification_status_id = $1) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(status.map(|s| s.id()))
            .fetch_all(pool)
            .await
    }

    /// Record an approval decision from the given university.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        verifier_university_id: DbId,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                is_verified = TRUE,
                verification_status_id = $2,
                verified_by = $3,
                verified_at = NOW(),
                rejection_reason = '',
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(VerificationStatus::Approved.id())
            .bind(verifier_university_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a rejection decision with its reason.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                is_verified = FALSE,
                verification_status_id = $2,
                rejection_reason = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(VerificationStatus::Rejected.id())
            .bind(reason)
            .fetch_optional(pool)
            .await
    }
}
