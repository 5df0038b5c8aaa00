//! Repository for the `students` table, including verification transitions.

use internhub_core::status::VerificationStatus;
use internhub_core::tags::join_tags;
use internhub_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::student::{Student, UpdateStudentProfile};

/// Column list for `students` queries.
const COLUMNS: &str = "\
    id, user_id, university_id, student_number, department, year, gpa, bio, \
    profile_picture_path, resume_path, portfolio_url, skills, \
    preferred_domains, projects_completed, rating, total_earned, \
    available_for_projects, is_verified, verification_status_id, \
    university_email, rejection_reason, verified_by, verified_at, \
    created_at, updated_at";

/// Provides CRUD and verification operations for student profiles.
pub struct StudentRepo;

impl StudentRepo {
    /// Create the empty profile skeleton at registration, in the same
    /// transaction as the user insert.
    pub async fn create_skeleton(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Student, sqlx::Error> {
        let query = format!("INSERT INTO students (user_id) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Student>(&query)
            .bind(user_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE user_id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the student's own profile fields.
    ///
    /// Unverified students re-enter the `pending` verification queue on every
    /// profile update so the university sees the latest details.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudentProfile,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                university_id = COALESCE($2, university_id),
                student_number = COALESCE($3, student_number),
                department = COALESCE($4, department),
                year = COALESCE($5, year),
                gpa = COALESCE($6, gpa),
                bio = COALESCE($7, bio),
                portfolio_url = COALESCE($8, portfolio_url),
                skills = COALESCE($9, skills),
                preferred_domains = COALESCE($10, preferred_domains),
                available_for_projects = COALESCE($11, available_for_projects),
                university_email = COALESCE($12, university_email),
                resume_path = COALESCE($13, resume_path),
                profile_picture_path = COALESCE($14, profile_picture_path),
                verification_status_id = CASE
                    WHEN is_verified THEN verification_status_id
                    ELSE $15
                END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(input.university_id)
            .bind(input.student_number.as_deref())
            .bind(input.department.as_deref())
            .bind(input.year.as_deref())
            .bind(input.gpa)
            .bind(input.bio.as_deref())
            .bind(input.portfolio_url.as_deref())
            .bind(input.skills.as_deref().map(join_tags))
            .bind(input.preferred_domains.as_deref().map(join_tags))
            .bind(input.available_for_projects)
            .bind(input.university_email.as_deref())
            .bind(input.resume_path.as_deref())
            .bind(input.profile_picture_path.as_deref())
            .bind(VerificationStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// List a university's students, optionally filtered by verification
    /// status.
    pub async fn list_by_university(
        pool: &PgPool,
        university_id: DbId,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students \
             WHERE university_id = $1 \
               AND ($2::SMALLINT IS NULL OR verification_status_id = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(university_id)
            .bind(status.map(|s| s.id()))
            .fetch_all(pool)
            .await
    }

    /// Record an approval decision. Clears any previous rejection reason.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        verifier_university_id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                is_verified = TRUE,
                verification_status_id = $2,
                verified_by = $3,
                verified_at = NOW(),
                rejection_reason = '',
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(VerificationStatus::Approved.id())
            .bind(verifier_university_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a rejection decision with its reason. `verified_at` is left
    /// unset on reject.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                is_verified = FALSE,
                verification_status_id = $2,
                rejection_reason = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(VerificationStatus::Rejected.id())
            .bind(reason)
            .fetch_optional(pool)
            .await
    }
}
