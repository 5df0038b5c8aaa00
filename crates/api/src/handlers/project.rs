//! Handlers for the `/projects` resource: posting, review, lifecycle, and
//! listings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use internhub_core::error::CoreError;
use internhub_core::lifecycle::{
    check_completable, check_reviewable, company_may_edit, initial_status, may_cancel,
    validate_review_decision, REVIEW_APPROVE,
};
use internhub_core::roles::{ROLE_COMPANY, ROLE_STUDENT, ROLE_UNIVERSITY};
use internhub_core::status::ProjectStatus;
use internhub_core::types::DbId;
use internhub_db::models::company::Company;
use internhub_db::models::project::{
    CreateProject, Project, ProjectListQuery, ProjectView, UpdateProject,
};
use internhub_db::models::student::StudentView;
use internhub_db::models::university::University;
use internhub_db::repositories::{
    ApplicationRepo, CompanyRepo, ProjectRepo, StudentRepo, UniversityRepo,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::identity::RequireUniversity;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string for `GET /projects/mine`.
#[derive(Debug, Deserialize)]
pub struct MineQuery {
    /// Filter by project status wire name.
    pub status: Option<String>,
}

/// Request body for `POST /projects/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// One of `approve`, `reject`.
    pub decision: String,
    /// Reason recorded on rejection; a default is used when omitted.
    pub reason: Option<String>,
}

/// Project detail with viewer-specific context.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectView,
    /// Whether the viewing student matches the advisory eligibility
    /// criteria. Absent for non-student viewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible: Option<bool>,
    /// Whether the viewing student has already applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_applied: Option<bool>,
    /// Whether the viewing student is staffed on the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_assigned: Option<bool>,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// The resolved poster identity of the caller, for endpoints open to both
/// poster roles.
pub enum Poster {
    Company(Company),
    University(University),
}

/// Resolve the caller as a poster (company or university). Students are
/// rejected.
pub async fn resolve_poster(state: &AppState, user: &AuthUser) -> AppResult<Poster> {
    match user.role.as_str() {
        ROLE_COMPANY => {
            let company = CompanyRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("Company profile missing".into()))
                })?;
            Ok(Poster::Company(company))
        }
        ROLE_UNIVERSITY => {
            let university = UniversityRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("University profile missing".into()))
                })?;
            Ok(Poster::University(university))
        }
        _ => Err(AppError::Core(CoreError::Forbidden(
            "Company or University role required".into(),
        ))),
    }
}

/// Whether this poster owns the project.
pub fn poster_owns(poster: &Poster, project: &Project) -> bool {
    match poster {
        Poster::Company(company) => {
            !project.posted_by_university && project.company_id == Some(company.id)
        }
        Poster::University(university) => {
            project.posted_by_university && project.university_id == university.id
        }
    }
}

/// Load a project or 404.
pub async fn load_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))
}

/// Decode the stored status id, which is constrained by a foreign key.
pub fn project_status(project: &Project) -> AppResult<ProjectStatus> {
    ProjectStatus::from_id(project.status_id).ok_or_else(|| {
        AppError::InternalError(format!("Unknown project status id {}", project.status_id))
    })
}

/// Load the project and verify the caller posted it.
pub async fn load_owned_project(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<(Project, Poster)> {
    let poster = resolve_poster(state, user).await?;
    let project = load_project(state, id).await?;
    if !poster_owns(&poster, &project) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's poster may do this".into(),
        )));
    }
    Ok((project, poster))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// Browse open projects with listing filters. Requires authentication but
/// no particular role. Students only see projects at their own university;
/// a student with no university selected sees none. The `university_id`
/// query filter remains available to other roles.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(mut query): Query<ProjectListQuery>,
) -> AppResult<Json<DataResponse<Vec<ProjectView>>>> {
    if user.role == ROLE_STUDENT {
        let student = StudentRepo::find_by_user_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden("Student profile missing".into()))
            })?;
        let Some(university_id) = student.university_id else {
            return Ok(Json(DataResponse { data: Vec::new() }));
        };
        query.university_id = Some(university_id);
    }

    let projects = ProjectRepo::list_open(&state.pool, &query).await?;
    Ok(Json(DataResponse {
        data: projects.into_iter().map(|p| p.into_view()).collect(),
    }))
}

/// GET /api/v1/projects/mine
///
/// The caller's own projects: posted projects for companies and
/// universities, assigned projects for students. A university filtering on
/// `pending_review` gets its review queue.
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MineQuery>,
) -> AppResult<Json<DataResponse<Vec<ProjectView>>>> {
    let status = match query.status.as_deref() {
        None => None,
        Some(name) => Some(ProjectStatus::from_name(name).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown project status '{name}'"
            )))
        })?),
    };

    let projects = match user.role.as_str() {
        ROLE_COMPANY => {
            let Poster::Company(company) = resolve_poster(&state, &user).await? else {
                unreachable!("role checked above");
            };
            ProjectRepo::list_for_company(&state.pool, company.id, status).await?
        }
        ROLE_UNIVERSITY => {
            let Poster::University(university) = resolve_poster(&state, &user).await? else {
                unreachable!("role checked above");
            };
            ProjectRepo::list_for_university(&state.pool, university.id, status).await?
        }
        ROLE_STUDENT => {
            let student = StudentRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("Student profile missing".into()))
                })?;
            ProjectRepo::list_assigned(&state.pool, student.id).await?
        }
        _ => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Unknown role".into(),
            )))
        }
    };

    Ok(Json(DataResponse {
        data: projects.into_iter().map(|p| p.into_view()).collect(),
    }))
}

/// GET /api/v1/projects/{id}
///
/// Project detail. Non-participants see only open projects. Students
/// additionally see projects they applied to or are staffed on; posters and
/// the owning university always see their own. Student viewers get advisory
/// eligibility and application context.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = load_project(&state, id).await?;
    let status = project_status(&project)?;

    let mut eligible = None;
    let mut has_applied = None;
    let mut is_assigned = None;

    match user.role.as_str() {
        ROLE_STUDENT => {
            let student = StudentRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("Student profile missing".into()))
                })?;
            let assigned = ProjectRepo::is_assigned(&state.pool, project.id, student.id).await?;
            let applied = ApplicationRepo::exists(&state.pool, project.id, student.id).await?;
            if !assigned && !applied && status != ProjectStatus::Open {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "project",
                    id,
                }));
            }
            let facts = internhub_core::eligibility::StudentFacts {
                department: &student.department,
                year: &student.year,
                gpa: student.gpa,
            };
            eligible = Some(internhub_core::eligibility::matches(
                &project.eligibility(),
                &facts,
            ));
            has_applied = Some(applied);
            is_assigned = Some(assigned);
        }
        _ => {
            let poster = resolve_poster(&state, &user).await?;
            let owning_university = matches!(&poster, Poster::University(u) if u.id == project.university_id);
            if !poster_owns(&poster, &project) && !owning_university && status != ProjectStatus::Open
            {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "project",
                    id,
                }));
            }
        }
    }

    Ok(Json(DataResponse {
        data: ProjectDetail {
            project: project.into_view(),
            eligible,
            has_applied,
            is_assigned,
        },
    }))
}

/// POST /api/v1/projects
///
/// Post a project. Companies must be verified and must name a target
/// university; the university's `auto_approve_projects` setting decides
/// whether the post opens immediately or waits for review. Universities
/// post to themselves and open immediately.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectView>>)> {
    input.validate()?;
    let poster = resolve_poster(&state, &user).await?;

    let project = match &poster {
        Poster::Company(company) => {
            if !company.is_verified {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Company must be verified before posting projects".into(),
                )));
            }
            let university_id = input.university_id.ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "university_id is required for company posts".into(),
                ))
            })?;
            let university = UniversityRepo::find_by_id(&state.pool, university_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "university",
                    id: university_id,
                }))?;
            if input.payment_amount < university.min_payment_amount {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Payment amount is below the university minimum of {}",
                    university.min_payment_amount
                ))));
            }
            let status = initial_status(false, university.auto_approve_projects);
            ProjectRepo::create(
                &state.pool,
                Some(company.id),
                university.id,
                false,
                status,
                &input,
            )
            .await?
        }
        Poster::University(university) => {
            let status = initial_status(true, false);
            ProjectRepo::create(&state.pool, None, university.id, true, status, &input).await?
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: project.into_view(),
        }),
    ))
}

/// PUT /api/v1/projects/{id}
///
/// Edit a project. Company posters may edit only drafts and rejected
/// projects; editing a rejected project resubmits it for review. University
/// posters are not status-gated.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    input.validate()?;
    let (project, poster) = load_owned_project(&state, &user, id).await?;
    let status = project_status(&project)?;

    if matches!(poster, Poster::Company(_)) && !company_may_edit(status) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Project can no longer be edited (status: {})",
            status.name()
        ))));
    }

    let updated = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;

    // An edited rejected project goes back into the review queue.
    let updated = if status == ProjectStatus::Rejected {
        ProjectRepo::mark_pending_review(&state.pool, id)
            .await?
            .unwrap_or(updated)
    } else {
        updated
    };

    Ok(Json(DataResponse {
        data: updated.into_view(),
    }))
}

/// POST /api/v1/projects/{id}/review
///
/// University decision on a pending project. The repository guard makes
/// the decision first-wins under concurrency.
pub async fn review(
    State(state): State<AppState>,
    auth: RequireUniversity,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    validate_review_decision(&input.decision)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let project = load_project(&state, id).await?;
    if project.university_id != auth.university.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the targeted university may review this project".into(),
        )));
    }
    check_reviewable(project_status(&project)?).map_err(AppError::Core)?;

    let updated = if input.decision == REVIEW_APPROVE {
        ProjectRepo::review_approve(&state.pool, id, auth.university.id).await?
    } else {
        let reason = internhub_core::verification::rejection_reason(input.reason.as_deref());
        ProjectRepo::review_reject(&state.pool, id, auth.university.id, &reason).await?
    };

    // The guard matched no row: another reviewer decided first.
    let project = updated.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Project has already been reviewed".into(),
        ))
    })?;

    Ok(Json(DataResponse {
        data: project.into_view(),
    }))
}

/// POST /api/v1/projects/{id}/cancel
///
/// Cancel a project that has not started (draft, pending review, or open).
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    let (project, _poster) = load_owned_project(&state, &user, id).await?;
    let status = project_status(&project)?;
    if !may_cancel(status) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Project can no longer be cancelled (status: {})",
            status.name()
        ))));
    }

    let project = ProjectRepo::cancel(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: project.into_view(),
    }))
}

/// POST /api/v1/projects/{id}/complete
///
/// Mark an in-progress project completed. Assigned students are credited
/// (completion count and earnings) in the same transaction.
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    let (project, _poster) = load_owned_project(&state, &user, id).await?;
    check_completable(project_status(&project)?).map_err(AppError::Core)?;

    let project = ProjectRepo::complete(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Project has already been completed".into(),
            ))
        })?;
    Ok(Json(DataResponse {
        data: project.into_view(),
    }))
}

/// DELETE /api/v1/projects/{id}
///
/// Delete a project that never ran (draft, rejected, or cancelled).
/// Cascades remove its applications and milestones.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let (project, _poster) = load_owned_project(&state, &user, id).await?;
    let status = project_status(&project)?;
    if !matches!(
        status,
        ProjectStatus::Draft | ProjectStatus::Rejected | ProjectStatus::Cancelled
    ) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Project cannot be deleted (status: {})",
            status.name()
        ))));
    }

    ProjectRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/students
///
/// Roster of assigned students. Visible to the poster and the owning
/// university.
pub async fn students(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<StudentView>>>> {
    let poster = resolve_poster(&state, &user).await?;
    let project = load_project(&state, id).await?;
    let owning_university =
        matches!(&poster, Poster::University(u) if u.id == project.university_id);
    if !poster_owns(&poster, &project) && !owning_university {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the poster or the owning university may view the roster".into(),
        )));
    }

    let students = ProjectRepo::assigned_students(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: students.into_iter().map(|s| s.into_view()).collect(),
    }))
}
