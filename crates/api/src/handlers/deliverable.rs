//! Handlers for deliverables: student submission and poster review.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use internhub_core::error::CoreError;
use internhub_core::milestone::{validate_review_action, REVIEW_APPROVE};
use internhub_core::status::ProjectStatus;
use internhub_core::types::DbId;
use internhub_db::models::deliverable::{
    CreateDeliverable, Deliverable, ReviewDeliverableRequest,
};
use internhub_db::repositories::{DeliverableRepo, MilestoneRepo, ProjectRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{load_project, poster_owns, project_status, resolve_poster};
use crate::middleware::auth::AuthUser;
use crate::middleware::identity::RequireStudent;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/deliverables
///
/// Submit work against an in-progress project. Only assigned students may
/// submit; an attached milestone must belong to the same project.
pub async fn submit(
    State(state): State<AppState>,
    auth: RequireStudent,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateDeliverable>,
) -> AppResult<(StatusCode, Json<DataResponse<Deliverable>>)> {
    input.validate()?;

    let project = load_project(&state, project_id).await?;
    if project_status(&project)? != ProjectStatus::InProgress {
        return Err(AppError::Core(CoreError::Conflict(
            "Deliverables can only be submitted to an in-progress project".into(),
        )));
    }
    if !ProjectRepo::is_assigned(&state.pool, project_id, auth.student.id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only assigned students may submit deliverables".into(),
        )));
    }

    if let Some(milestone_id) = input.milestone_id {
        let milestone = MilestoneRepo::find_by_id(&state.pool, milestone_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "milestone",
                id: milestone_id,
            }))?;
        if milestone.project_id != project_id {
            return Err(AppError::Core(CoreError::Validation(
                "Milestone belongs to a different project".into(),
            )));
        }
    }

    let deliverable =
        DeliverableRepo::create(&state.pool, project_id, auth.student.id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: deliverable }),
    ))
}

/// GET /api/v1/projects/{id}/deliverables
///
/// A project's deliverables, newest first. Visible to the poster, the
/// owning university, and assigned students.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Deliverable>>>> {
    let project = load_project(&state, project_id).await?;

    let allowed = match user.role.as_str() {
        internhub_core::roles::ROLE_STUDENT => {
            let student =
                internhub_db::repositories::StudentRepo::find_by_user_id(&state.pool, user.user_id)
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
            "Only project participants may view deliverables".into(),
        )));
    }

    let deliverables = DeliverableRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: deliverables }))
}

/// POST /api/v1/deliverables/{id}/review
///
/// Poster review of a deliverable: `approve` or `revision`. Approval
/// recomputes the linked milestone's status; a revision request downgrades
/// it unconditionally.
pub async fn review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewDeliverableRequest>,
) -> AppResult<Json<DataResponse<Deliverable>>> {
    validate_review_action(&input.action)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let deliverable = DeliverableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "deliverable",
            id,
        }))?;

    let poster = resolve_poster(&state, &user).await?;
    let project = load_project(&state, deliverable.project_id).await?;
    if !poster_owns(&poster, &project) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's poster may review deliverables".into(),
        )));
    }

    let feedback = input.feedback.as_deref().unwrap_or("");
    let updated = if input.action == REVIEW_APPROVE {
        DeliverableRepo::approve(&state.pool, id, feedback).await?
    } else {
        DeliverableRepo::request_revision(&state.pool, id, feedback).await?
    };

    let deliverable = updated.ok_or(AppError::Core(CoreError::NotFound {
        entity: "deliverable",
        id,
    }))?;
    Ok(Json(DataResponse { data: deliverable }))
}
