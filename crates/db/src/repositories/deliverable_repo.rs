//! Repository for deliverables and the milestone recomputation that review
//! decisions trigger.

use internhub_core::milestone::{status_after_approval, status_after_revision};
use internhub_core::status::MilestoneStatus;
use internhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::deliverable::{CreateDeliverable, Deliverable};

/// Column list for `deliverables` queries.
const COLUMNS: &str = "\
    id, project_id, student_id, milestone_id, title, description, file_path, \
    submission_notes, is_approved, revision_required, feedback, \
    submitted_at, reviewed_at";

/// Provides submission and review operations for deliverables.
pub struct DeliverableRepo;

impl DeliverableRepo {
    /// Submit a deliverable. When attached to a milestone, the milestone
    /// moves to `submitted` in the same transaction (unless already
    /// approved).
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        student_id: DbId,
        input: &CreateDeliverable,
    ) -> Result<Deliverable, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO deliverables (
                project_id, student_id, milestone_id, title, description,
                file_path, submission_notes
             ) VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let deliverable = sqlx::query_as::<_, Deliverable>(&query)
            .bind(project_id)
            .bind(student_id)
            .bind(input.milestone_id)
            .bind(&input.title)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(&input.file_path)
            .bind(input.submission_notes.as_deref().unwrap_or(""))
            .fetch_one(&mut *tx)
            .await?;

        if let Some(milestone_id) = input.milestone_id {
            sqlx::query(
                "UPDATE milestones SET status_id = $2, updated_at = NOW() \
                 WHERE id = $1 AND status_id <> $3",
            )
            .bind(milestone_id)
            .bind(MilestoneStatus::Submitted.id())
            .bind(MilestoneStatus::Approved.id())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deliverable)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deliverables WHERE id = $1");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A project's deliverables, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Deliverable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM deliverables \
             WHERE project_id = $1 \
             ORDER BY submitted_at DESC"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Approve a deliverable and recompute its milestone's status. The
    /// milestone row is locked so concurrent reviews of sibling
    /// deliverables serialize on the recomputation.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        feedback: &str,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(milestone_id) = Self::lock_milestone(&mut tx, id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query = format!(
            "UPDATE deliverables SET
                is_approved = TRUE,
                revision_required = FALSE,
                feedback = $2,
                reviewed_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let deliverable = sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .bind(feedback)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(milestone_id) = milestone_id {
            let flags: Vec<(bool,)> = sqlx::query_as(
                "SELECT is_approved FROM deliverables WHERE milestone_id = $1",
            )
            .bind(milestone_id)
            .fetch_all(&mut *tx)
            .await?;
            let approvals: Vec<bool> = flags.into_iter().map(|(a,)| a).collect();

            if let Some(status) = status_after_approval(&approvals) {
                sqlx::query(
                    "UPDATE milestones SET
                        status_id = $2,
                        completed_at = NOW(),
                        updated_at = NOW()
                     WHERE id = $1",
                )
                .bind(milestone_id)
                .bind(status.id())
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(deliverable))
    }

    /// Send a deliverable back for revision; the milestone follows.
    pub async fn request_revision(
        pool: &PgPool,
        id: DbId,
        feedback: &str,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(milestone_id) = Self::lock_milestone(&mut tx, id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query = format!(
            "UPDATE deliverables SET
                is_approved = FALSE,
                revision_required = TRUE,
                feedback = $2,
                reviewed_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let deliverable = sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .bind(feedback)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(milestone_id) = milestone_id {
            sqlx::query(
                "UPDATE milestones SET
                    status_id = $2,
                    completed_at = NULL,
                    updated_at = NOW()
                 WHERE id = $1",
            )
            .bind(milestone_id)
            .bind(status_after_revision().id())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(deliverable))
    }

    /// Look up the deliverable's milestone and take a row lock on it.
    /// Returns `None` when the deliverable itself does not exist.
    async fn lock_milestone(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        deliverable_id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        let row: Option<(Option<DbId>,)> =
            sqlx::query_as("SELECT milestone_id FROM deliverables WHERE id = $1")
                .bind(deliverable_id)
                .fetch_optional(&mut **tx)
                .await?;
        let Some((milestone_id,)) = row else {
            return Ok(None);
        };
        if let Some(milestone_id) = milestone_id {
            sqlx::query("SELECT id FROM milestones WHERE id = $1 FOR UPDATE")
                .bind(milestone_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(Some(milestone_id))
    }
}
