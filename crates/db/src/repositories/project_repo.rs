//! Repository for the `projects` table and the assignment join table.

use internhub_core::status::ProjectStatus;
use internhub_core::tags::join_tags;
use internhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectListQuery, UpdateProject};
use crate::models::student::Student;

/// Column list for `projects` queries.
const COLUMNS: &str = "\
    id, poster_type, company_id, university_id, posted_by_university, title, \
    domain, description, required_skills, team_type, team_size, job_type, \
    eligible_departments, min_gpa, eligible_years, payment_amount, \
    payment_type, duration_weeks, deadline, status_id, rejection_reason, \
    attachment_path, created_at, updated_at, submitted_for_review_at, \
    approved_at, completed_at";

const STUDENT_COLUMNS: &str = "\
    s.id, s.user_id, s.university_id, s.student_number, s.department, \
    s.year, s.gpa, s.bio, s.profile_picture_path, s.resume_path, \
    s.portfolio_url, s.skills, s.preferred_domains, s.projects_completed, \
    s.rating, s.total_earned, s.available_for_projects, s.is_verified, \
    s.verification_status_id, s.university_email, s.rejection_reason, \
    s.verified_by, s.verified_at, s.created_at, s.updated_at";

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Provides lifecycle and listing operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project. The caller decides poster identity and initial
    /// status; review/approval timestamps follow the status.
    pub async fn create(
        pool: &PgPool,
        company_id: Option<DbId>,
        university_id: DbId,
        posted_by_university: bool,
        status: ProjectStatus,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let poster_type = if posted_by_university {
            "university"
        } else {
            "company"
        };
        let query = format!(
            "INSERT INTO projects (
                poster_type, company_id, university_id, posted_by_university,
                title, domain, description, required_skills, team_type,
                team_size, job_type, eligible_departments, min_gpa,
                eligible_years, payment_amount, payment_type, duration_weeks,
                deadline, attachment_path, status_id,
                submitted_for_review_at, approved_at
             ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20,
                CASE WHEN $20 = $21 THEN NOW() END,
                CASE WHEN $20 = $22 THEN NOW() END
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(poster_type)
            .bind(company_id)
            .bind(university_id)
            .bind(posted_by_university)
            .bind(&input.title)
            .bind(&input.domain)
            .bind(&input.description)
            .bind(join_tags(&input.required_skills))
            .bind(input.team_type.as_deref().unwrap_or("individual"))
            .bind(input.team_size.unwrap_or(1))
            .bind(input.job_type.as_deref().unwrap_or("remote"))
            .bind(input.eligible_departments.as_deref().map(join_tags).unwrap_or_default())
            .bind(input.min_gpa)
            .bind(input.eligible_years.as_deref().map(join_tags).unwrap_or_default())
            .bind(input.payment_amount)
            .bind(input.payment_type.as_deref().unwrap_or("fixed"))
            .bind(input.duration_weeks)
            .bind(input.deadline)
            .bind(input.attachment_path.as_deref())
            .bind(status.id())
            .bind(ProjectStatus::PendingReview.id())
            .bind(ProjectStatus::Open.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Browse open projects with the public listing filters. Search matches
    /// title, description and required skills.
    pub async fn list_open(
        pool: &PgPool,
        filters: &ProjectListQuery,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let limit = filters
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = (filters.page.unwrap_or(1).max(1) - 1) * limit;
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE status_id = $1 \
               AND ($2::TEXT IS NULL OR domain = $2) \
               AND ($3::BIGINT IS NULL OR university_id = $3) \
               AND ($4::TEXT IS NULL OR title ILIKE '%' || $4 || '%' \
                    OR description ILIKE '%' || $4 || '%' \
                    OR required_skills ILIKE '%' || $4 || '%') \
               AND ($5::DOUBLE PRECISION IS NULL OR payment_amount >= $5) \
               AND ($6::DOUBLE PRECISION IS NULL OR payment_amount <= $6) \
             ORDER BY created_at DESC \
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(ProjectStatus::Open.id())
            .bind(filters.domain.as_deref())
            .bind(filters.university_id)
            .bind(filters.search.as_deref())
            .bind(filters.min_payment)
            .bind(filters.max_payment)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// A company's own projects, newest first, optionally filtered by status.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE company_id = $1 \
               AND ($2::SMALLINT IS NULL OR status_id = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(company_id)
            .bind(status.map(|s| s.id()))
            .fetch_all(pool)
            .await
    }

    /// Projects targeting a university (both company-submitted and its own),
    /// optionally filtered by status. The review queue is this with
    /// `PendingReview`.
    pub async fn list_for_university(
        pool: &PgPool,
        university_id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE university_id = $1 \
               AND ($2::SMALLINT IS NULL OR status_id = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(university_id)
            .bind(status.map(|s| s.id()))
            .fetch_all(pool)
            .await
    }

    /// Projects a student is staffed on.
    pub async fn list_assigned(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE id IN (SELECT project_id FROM project_assignments WHERE student_id = $1) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    pub async fn is_assigned(
        pool: &PgPool,
        project_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM project_assignments \
             WHERE project_id = $1 AND student_id = $2)",
        )
        .bind(project_id)
        .bind(student_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Students staffed on a project, for the workspace roster.
    pub async fn assigned_students(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {STUDENT_COLUMNS} FROM students s \
             JOIN project_assignments pa ON pa.student_id = s.id \
             WHERE pa.project_id = $1 \
             ORDER BY pa.assigned_at"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Apply an edit. Status gating happens in the handler; this only
    /// rewrites columns.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                domain = COALESCE($3, domain),
                description = COALESCE($4, description),
                required_skills = COALESCE($5, required_skills),
                team_type = COALESCE($6, team_type),
                team_size = COALESCE($7, team_size),
                job_type = COALESCE($8, job_type),
                eligible_departments = COALESCE($9, eligible_departments),
                min_gpa = COALESCE($10, min_gpa),
                eligible_years = COALESCE($11, eligible_years),
                payment_amount = COALESCE($12, payment_amount),
                payment_type = COALESCE($13, payment_type),
                duration_weeks = COALESCE($14, duration_weeks),
                deadline = COALESCE($15, deadline),
                attachment_path = COALESCE($16, attachment_path),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.domain.as_deref())
            .bind(input.description.as_deref())
            .bind(input.required_skills.as_deref().map(join_tags))
            .bind(input.team_type.as_deref())
            .bind(input.team_size)
            .bind(input.job_type.as_deref())
            .bind(input.eligible_departments.as_deref().map(join_tags))
            .bind(input.min_gpa)
            .bind(input.eligible_years.as_deref().map(join_tags))
            .bind(input.payment_amount)
            .bind(input.payment_type.as_deref())
            .bind(input.duration_weeks)
            .bind(input.deadline)
            .bind(input.attachment_path.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Resubmit an edited project for review. Clears any earlier rejection
    /// reason and stamps the submission time.
    pub async fn mark_pending_review(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status_id = $2,
                rejection_reason = '',
                submitted_for_review_at = NOW(),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(ProjectStatus::PendingReview.id())
            .fetch_optional(pool)
            .await
    }

    /// Approve a pending project. The guard in the WHERE clause makes the
    /// decision first-wins: a second approval (or one from the wrong
    /// university) matches no row.
    pub async fn review_approve(
        pool: &PgPool,
        id: DbId,
        university_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status_id = $3,
                rejection_reason = '',
                approved_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND university_id = $2 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(university_id)
            .bind(ProjectStatus::Open.id())
            .bind(ProjectStatus::PendingReview.id())
            .fetch_optional(pool)
            .await
    }

    /// Reject a pending project with a reason. Same first-wins guard as
    /// [`ProjectRepo::review_approve`].
    pub async fn review_reject(
        pool: &PgPool,
        id: DbId,
        university_id: DbId,
        reason: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status_id = $3,
                rejection_reason = $5,
                updated_at = NOW()
             WHERE id = $1 AND university_id = $2 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(university_id)
            .bind(ProjectStatus::Rejected.id())
            .bind(ProjectStatus::PendingReview.id())
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a project that has not started. Lifecycle gating happens in
    /// the handler.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(ProjectStatus::Cancelled.id())
            .fetch_optional(pool)
            .await
    }

    /// Complete an in-progress project and credit every assigned student in
    /// the same transaction.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                status_id = $2,
                completed_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(ProjectStatus::Completed.id())
            .bind(ProjectStatus::InProgress.id())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "UPDATE students SET
                projects_completed = projects_completed + 1,
                total_earned = total_earned + $2,
                updated_at = NOW()
             WHERE id IN (SELECT student_id FROM project_assignments WHERE project_id = $1)",
        )
        .bind(id)
        .bind(project.payment_amount)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Delete a project outright. Only drafts and rejected projects reach
    /// here; cascades remove applications and milestones.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
