//! Repository for project applications, including the accept transaction
//! that staffs the project.

use internhub_core::status::{ApplicationStatus, ProjectStatus};
use internhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{Application, ApplicationCounts, CreateApplication};

/// Column list for `project_applications` queries.
const COLUMNS: &str = "\
    id, project_id, student_id, cover_letter, proposed_approach, \
    portfolio_links, is_team_application, status_id, reviewed_at, \
    created_at, updated_at";

/// Provides CRUD and decision operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Submit an application. Team members land in the join table in the
    /// same transaction. A duplicate surfaces as a unique constraint
    /// violation (`uq_applications_project_student`).
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        student_id: DbId,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO project_applications (
                project_id, student_id, cover_letter, proposed_approach,
                portfolio_links, is_team_application
             ) VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(project_id)
            .bind(student_id)
            .bind(&input.cover_letter)
            .bind(input.proposed_approach.as_deref().unwrap_or(""))
            .bind(input.portfolio_links.as_deref().unwrap_or(""))
            .bind(input.is_team_application.unwrap_or(false))
            .fetch_one(&mut *tx)
            .await?;

        if let Some(member_ids) = &input.team_member_ids {
            for member_id in member_ids {
                sqlx::query(
                    "INSERT INTO application_team_members (application_id, student_id) \
                     VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(application.id)
                .bind(member_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(application)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(
        pool: &PgPool,
        project_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM project_applications \
             WHERE project_id = $1 AND student_id = $2)",
        )
        .bind(project_id)
        .bind(student_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Applications to a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_applications \
             WHERE project_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// A student's own applications, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_applications \
             WHERE student_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Extra students listed on a team application.
    pub async fn team_member_ids(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT student_id FROM application_team_members \
             WHERE application_id = $1 ORDER BY student_id",
        )
        .bind(application_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Per-status counters for a project's application list.
    pub async fn counts_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<ApplicationCounts, sqlx::Error> {
        sqlx::query_as::<_, ApplicationCounts>(
            "SELECT
                COUNT(*)                                    AS total,
                COUNT(*) FILTER (WHERE status_id = $2)      AS pending,
                COUNT(*) FILTER (WHERE status_id = $3)      AS shortlisted,
                COUNT(*) FILTER (WHERE status_id = $4)      AS accepted,
                COUNT(*) FILTER (WHERE status_id = $5)      AS rejected
             FROM project_applications WHERE project_id = $1",
        )
        .bind(project_id)
        .bind(ApplicationStatus::Pending.id())
        .bind(ApplicationStatus::Shortlisted.id())
        .bind(ApplicationStatus::Accepted.id())
        .bind(ApplicationStatus::Rejected.id())
        .fetch_one(pool)
        .await
    }

    /// Accept an application: mark it accepted, staff the student, and flip
    /// the project to in-progress, all in one transaction. The guarded
    /// project update is idempotent when a teammate's acceptance already
    /// flipped it.
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        student_id: DbId,
    ) -> Result<Application, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE project_applications SET
                status_id = $2,
                reviewed_at = NOW(),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(ApplicationStatus::Accepted.id())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO project_assignments (project_id, student_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(student_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE projects SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status_id = $3",
        )
        .bind(project_id)
        .bind(ProjectStatus::InProgress.id())
        .bind(ProjectStatus::Open.id())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(application)
    }

    /// Move an application to a non-accepting status. Shortlisting leaves
    /// `reviewed_at` unset; rejection stamps it.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, sqlx::Error> {
        let stamp_review = matches!(status, ApplicationStatus::Rejected);
        let query = format!(
            "UPDATE project_applications SET
                status_id = $2,
                reviewed_at = CASE WHEN $3 THEN NOW() ELSE reviewed_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status.id())
            .bind(stamp_review)
            .fetch_optional(pool)
            .await
    }

    /// Withdraw the student's own pending application.
    pub async fn withdraw(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE project_applications SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status_id IN ($3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(ApplicationStatus::Withdrawn.id())
            .bind(ApplicationStatus::Pending.id())
            .bind(ApplicationStatus::Shortlisted.id())
            .fetch_optional(pool)
            .await
    }
}
