//! Handlers for project milestones.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use internhub_core::error::CoreError;
use internhub_core::status::{MilestoneStatus, ProjectStatus};
use internhub_core::types::DbId;
use internhub_db::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};
use internhub_db::repositories::{MilestoneRepo, ProjectRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{load_project, poster_owns, project_status, resolve_poster};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/milestones
///
/// Add a milestone at the end of the project's sequence. Poster only;
/// finished projects are frozen.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<DataResponse<Milestone>>)> {
    input.validate()?;

    let poster = resolve_poster(&state, &user).await?;
    let project = load_project(&state, project_id).await?;
    if !poster_owns(&poster, &project) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's poster may manage milestones".into(),
        )));
    }
    let status = project_status(&project)?;
    if matches!(status, ProjectStatus::Completed | ProjectStatus::Cancelled) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Milestones cannot be added to a finished project (status: {})",
            status.name()
        ))));
    }

    let milestone = MilestoneRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: milestone })))
}

/// GET /api/v1/projects/{id}/milestones
///
/// A project's milestones in sequence order. Any authenticated viewer who
/// can see the project may list them.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Milestone>>>> {
    // 404 for a nonexistent project rather than an empty list.
    load_project(&state, project_id).await?;
    let milestones = MilestoneRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: milestones }))
}

/// PUT /api/v1/milestones/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Json<DataResponse<Milestone>>> {
    input.validate()?;
    let milestone = load_owned_milestone(&state, &user, id).await?;

    let updated = MilestoneRepo::update(&state.pool, milestone.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "milestone",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/milestones/{id}
///
/// Remove a milestone that has not been approved. Linked deliverables are
/// kept (their milestone reference is nulled).
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let milestone = load_owned_milestone(&state, &user, id).await?;
    if milestone.status_id == MilestoneStatus::Approved.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "An approved milestone cannot be deleted".into(),
        )));
    }

    MilestoneRepo::delete(&state.pool, milestone.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Load a milestone and verify the caller posted its project.
async fn load_owned_milestone(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Milestone> {
    let milestone = MilestoneRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "milestone",
            id,
        }))?;

    let poster = resolve_poster(state, user).await?;
    let project = ProjectRepo::find_by_id(&state.pool, milestone.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id: milestone.project_id,
        }))?;
    if !poster_owns(&poster, &project) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's poster may manage milestones".into(),
        )));
    }
    Ok(milestone)
}
