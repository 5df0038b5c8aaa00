//! Repository for the `universities` table.

use internhub_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::university::{University, UpdateUniversityProfile};

/// Column list for `universities` queries.
const COLUMNS: &str = "\
    id, user_id, name, address, website, description, logo_path, admin_name, \
    admin_email, admin_phone, is_verified, auto_approve_projects, \
    min_payment_amount, created_at, updated_at";

/// Provides CRUD operations for university profiles.
pub struct UniversityRepo;

impl UniversityRepo {
    /// Create the empty profile skeleton at registration, in the same
    /// transaction as the user insert.
    pub async fn create_skeleton(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<University, sqlx::Error> {
        let query = format!("INSERT INTO universities (user_id) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, University>(&query)
            .bind(user_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<University>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM universities WHERE id = $1");
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<University>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM universities WHERE user_id = $1");
        sqlx::query_as::<_, University>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the university's own profile and workflow settings.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUniversityProfile,
    ) -> Result<Option<University>, sqlx::Error> {
        let query = format!(
            "UPDATE universities SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                website = COALESCE($4, website),
                description = COALESCE($5, description),
                admin_name = COALESCE($6, admin_name),
                admin_email = COALESCE($7, admin_email),
                admin_phone = COALESCE($8, admin_phone),
                auto_approve_projects = COALESCE($9, auto_approve_projects),
                min_payment_amount = COALESCE($10, min_payment_amount),
                logo_path = COALESCE($11, logo_path),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, University>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.address.as_deref())
            .bind(input.website.as_deref())
            .bind(input.description.as_deref())
            .bind(input.admin_name.as_deref())
            .bind(input.admin_email.as_deref())
            .bind(input.admin_phone.as_deref())
            .bind(input.auto_approve_projects)
            .bind(input.min_payment_amount)
            .bind(input.logo_path.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Public directory of universities for registration and posting forms.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<University>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM universities ORDER BY name");
        sqlx::query_as::<_, University>(&query).fetch_all(pool).await
    }
}
