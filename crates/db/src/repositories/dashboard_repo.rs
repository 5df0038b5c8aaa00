//! Dashboard aggregation queries. Every number here is computed from live
//! rows at read time.

use internhub_core::status::{ApplicationStatus, ProjectStatus, VerificationStatus};
use internhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::{CompanyDashboard, StudentDashboard, UniversityDashboard};

/// Provides the per-role dashboard aggregates.
pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<StudentDashboard, sqlx::Error> {
        sqlx::query_as::<_, StudentDashboard>(
            "SELECT
                (SELECT COUNT(*) FROM project_assignments pa
                    JOIN projects p ON p.id = pa.project_id
                    WHERE pa.student_id = $1 AND p.status_id = $2) AS active_projects,
                (SELECT COUNT(*) FROM project_assignments pa
                    JOIN projects p ON p.id = pa.project_id
                    WHERE pa.student_id = $1 AND p.status_id = $3) AS completed_projects,
                (SELECT COUNT(*) FROM project_applications
                    WHERE student_id = $1 AND status_id = $4) AS pending_applications,
                (SELECT total_earned FROM students WHERE id = $1) AS total_earned",
        )
        .bind(student_id)
        .bind(ProjectStatus::InProgress.id())
        .bind(ProjectStatus::Completed.id())
        .bind(ApplicationStatus::Pending.id())
        .fetch_one(pool)
        .await
    }

    pub async fn company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<CompanyDashboard, sqlx::Error> {
        sqlx::query_as::<_, CompanyDashboard>(
            "SELECT
                (SELECT COUNT(*) FROM projects WHERE company_id = $1) AS total_projects,
                (SELECT COUNT(*) FROM projects
                    WHERE company_id = $1 AND status_id = $2) AS pending_review,
                (SELECT COUNT(*) FROM projects
                    WHERE company_id = $1 AND status_id = $3) AS open_projects,
                (SELECT COUNT(*) FROM projects
                    WHERE company_id = $1 AND status_id = $4) AS active_projects,
                (SELECT COUNT(*) FROM projects
                    WHERE company_id = $1 AND status_id = $5) AS completed_projects,
                (SELECT COUNT(*) FROM projects
                    WHERE company_id = $1 AND status_id = $6) AS rejected_projects,
                (SELECT rating FROM companies WHERE id = $1) AS rating",
        )
        .bind(company_id)
        .bind(ProjectStatus::PendingReview.id())
        .bind(ProjectStatus::Open.id())
        .bind(ProjectStatus::InProgress.id())
        .bind(ProjectStatus::Completed.id())
        .bind(ProjectStatus::Rejected.id())
        .fetch_one(pool)
        .await
    }

    pub async fn university(
        pool: &PgPool,
        university_id: DbId,
    ) -> Result<UniversityDashboard, sqlx::Error> {
        sqlx::query_as::<_, UniversityDashboard>(
            "SELECT
                (SELECT COUNT(*) FROM projects
                    WHERE university_id = $1 AND status_id = $2) AS pending_projects,
                (SELECT COUNT(*) FROM projects
                    WHERE university_id = $1 AND status_id = $3) AS active_projects,
                (SELECT COUNT(*) FROM students
                    WHERE university_id = $1) AS total_students,
                (SELECT COUNT(*) FROM students
                    WHERE university_id = $1 AND verification_status_id = $4) AS pending_students,
                (SELECT COUNT(*) FROM companies WHERE is_verified) AS verified_companies",
        )
        .bind(university_id)
        .bind(ProjectStatus::PendingReview.id())
        .bind(ProjectStatus::InProgress.id())
        .bind(VerificationStatus::Pending.id())
        .fetch_one(pool)
        .await
    }
}
