//! Handlers for applications: student submission and poster decisions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use internhub_core::application::{
    action_target_status, is_actionable, validate_action, ACTION_ACCEPT,
};
use internhub_core::error::CoreError;
use internhub_core::lifecycle::check_open_for_applications;
use internhub_core::status::ApplicationStatus;
use internhub_core::types::DbId;
use internhub_db::models::application::{
    Application, ApplicationActionRequest, ApplicationCounts, CreateApplication,
};
use internhub_db::repositories::ApplicationRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{load_project, poster_owns, project_status, resolve_poster};
use crate::middleware::auth::AuthUser;
use crate::middleware::identity::RequireStudent;
use crate::response::DataResponse;
use crate::state::AppState;

/// A project's applications together with per-status counters.
#[derive(Debug, Serialize)]
pub struct ApplicationList {
    pub applications: Vec<Application>,
    pub counts: ApplicationCounts,
}

/// POST /api/v1/projects/{id}/apply
///
/// Submit an application. Requires a verified student, an open project, and
/// an unexpired deadline. Eligibility criteria are advisory and never block
/// submission here.
pub async fn apply(
    State(state): State<AppState>,
    auth: RequireStudent,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateApplication>,
) -> AppResult<(StatusCode, Json<DataResponse<Application>>)> {
    input.validate()?;

    if !auth.student.is_verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Student must be verified before applying".into(),
        )));
    }

    let project = load_project(&state, project_id).await?;
    check_open_for_applications(project_status(&project)?).map_err(AppError::Core)?;

    if Utc::now().date_naive() > project.deadline {
        return Err(AppError::Core(CoreError::Conflict(
            "Application deadline has passed".into(),
        )));
    }

    if ApplicationRepo::exists(&state.pool, project_id, auth.student.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already applied to this project".into(),
        )));
    }

    let application =
        ApplicationRepo::create(&state.pool, project_id, auth.student.id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: application }),
    ))
}

/// GET /api/v1/applications/mine
pub async fn mine(
    State(state): State<AppState>,
    auth: RequireStudent,
) -> AppResult<Json<DataResponse<Vec<Application>>>> {
    let applications = ApplicationRepo::list_for_student(&state.pool, auth.student.id).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/projects/{id}/applications
///
/// A project's applications with counters. Poster only.
pub async fn list_for_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApplicationList>>> {
    let poster = resolve_poster(&state, &user).await?;
    let project = load_project(&state, project_id).await?;
    if !poster_owns(&poster, &project) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's poster may view applications".into(),
        )));
    }

    let applications = ApplicationRepo::list_for_project(&state.pool, project_id).await?;
    let counts = ApplicationRepo::counts_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse {
        data: ApplicationList {
            applications,
            counts,
        },
    }))
}

/// POST /api/v1/applications/{id}/act
///
/// Poster decision on an application: `accept`, `reject`, or `shortlist`.
/// Accepting staffs the student and flips an open project to in-progress in
/// one transaction. Shortlisting is not a final decision and leaves
/// `reviewed_at` unset.
pub async fn act(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ApplicationActionRequest>,
) -> AppResult<Json<DataResponse<Application>>> {
    validate_action(&input.action).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let application = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "application",
            id,
        }))?;

    let poster = resolve_poster(&state, &user).await?;
    let project = load_project(&state, application.project_id).await?;
    if !poster_owns(&poster, &project) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's poster may act on applications".into(),
        )));
    }

    let current = ApplicationStatus::from_id(application.status_id).ok_or_else(|| {
        AppError::InternalError(format!(
            "Unknown application status id {}",
            application.status_id
        ))
    })?;
    if !is_actionable(current) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Application has already been decided (status: {})",
            current.name()
        ))));
    }

    let updated = if input.action == ACTION_ACCEPT {
        ApplicationRepo::accept(&state.pool, id, project.id, application.student_id).await?
    } else {
        let target = action_target_status(&input.action).ok_or_else(|| {
            AppError::InternalError(format!("Unreachable action '{}'", input.action))
        })?;
        ApplicationRepo::set_status(&state.pool, id, target)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "application",
                id,
            }))?
    };

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/applications/{id}/withdraw
///
/// Withdraw the student's own undecided application.
pub async fn withdraw(
    State(state): State<AppState>,
    auth: RequireStudent,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "application",
            id,
        }))?;
    if application.student_id != auth.student.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only withdraw your own application".into(),
        )));
    }

    let withdrawn = ApplicationRepo::withdraw(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Application has already been decided".into(),
            ))
        })?;
    Ok(Json(DataResponse { data: withdrawn }))
}
