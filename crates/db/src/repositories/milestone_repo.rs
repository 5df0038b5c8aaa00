//! Repository for project milestones.

use internhub_core::status::MilestoneStatus;
use internhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};

/// Column list for `milestones` queries.
const COLUMNS: &str = "\
    id, project_id, title, description, sort_order, payment_percentage, \
    due_date, completed_at, status_id, created_at, updated_at";

/// Provides CRUD and progress operations for milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Insert a milestone at the end of the project's sequence. The
    /// subquery assigns `sort_order` so clients never pick it.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateMilestone,
    ) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones (
                project_id, title, description, sort_order,
                payment_percentage, due_date
             ) VALUES (
                $1, $2, $3,
                (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM milestones WHERE project_id = $1),
                $4, $5
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(input.payment_percentage.unwrap_or(0.0))
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A project's milestones in sequence order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestones \
             WHERE project_id = $1 \
             ORDER BY sort_order"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMilestone,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                payment_percentage = COALESCE($4, payment_percentage),
                due_date = COALESCE($5, due_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.payment_percentage)
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// (approved, total) milestone counts for the progress bar.
    pub async fn progress_counts(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<(i64, i64), sqlx::Error> {
        let row: (i64, i64) = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE status_id = $2),
                COUNT(*)
             FROM milestones WHERE project_id = $1",
        )
        .bind(project_id)
        .bind(MilestoneStatus::Approved.id())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }
}
