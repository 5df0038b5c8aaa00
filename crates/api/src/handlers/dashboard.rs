//! Handlers for dashboards and project progress. All counters are live
//! aggregates; nothing is cached or stored.

use axum::extract::{Path, State};
use axum::Json;
use internhub_core::error::CoreError;
use internhub_core::milestone::progress_percentage;
use internhub_core::roles::{ROLE_COMPANY, ROLE_STUDENT, ROLE_UNIVERSITY};
use internhub_core::types::DbId;
use internhub_db::models::dashboard::ProjectProgress;
use internhub_db::repositories::{
    CompanyRepo, DashboardRepo, MilestoneRepo, ProjectRepo, StudentRepo, UniversityRepo,
};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{load_project, poster_owns, resolve_poster};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
///
/// Role-shaped dashboard counters for the authenticated user.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Value>>> {
    let data = match user.role.as_str() {
        ROLE_STUDENT => {
            let student = StudentRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("Student profile missing".into()))
                })?;
            let dashboard = DashboardRepo::student(&state.pool, student.id).await?;
            serde_json::to_value(dashboard)
        }
        ROLE_COMPANY => {
            let company = CompanyRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("Company profile missing".into()))
                })?;
            let dashboard = DashboardRepo::company(&state.pool, company.id).await?;
            serde_json::to_value(dashboard)
        }
        ROLE_UNIVERSITY => {
            let university = UniversityRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("University profile missing".into()))
                })?;
            let dashboard = DashboardRepo::university(&state.pool, university.id).await?;
            serde_json::to_value(dashboard)
        }
        _ => return Err(AppError::Core(CoreError::Forbidden("Unknown role".into()))),
    }
    .map_err(|e| AppError::InternalError(format!("Dashboard serialization error: {e}")))?;

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/projects/{id}/progress
///
/// Milestone completion summary for the project workspace. Visible to the
/// poster, the owning university, and assigned students.
pub async fn project_progress(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectProgress>>> {
    let project = load_project(&state, project_id).await?;

    let allowed = match user.role.as_str() {
        ROLE_STUDENT => {
            let student = StudentRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("Student profile missing".into()))
                })?;
            ProjectRepo::is_assigned(&state.pool, project_id, student.id).await?
        }
        _ => {
            let poster = resolve_poster(&state, &user).await?;
            poster_owns(&poster, &project)
                || matches!(&poster, crate::handlers::project::Poster::University(u) if u.id == project.university_id)
        }
    };
    if !allowed {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only project participants may view progress".into(),
        )));
    }

    let (approved, total) = MilestoneRepo::progress_counts(&state.pool, project_id).await?;
    Ok(Json(DataResponse {
        data: ProjectProgress {
            total_milestones: total,
            approved_milestones: approved,
            progress_percentage: progress_percentage(approved, total),
        },
    }))
}
