//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{application, dashboard, deliverable, milestone, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                   -> browse open projects
/// POST   /                   -> post a project (company/university)
/// GET    /mine               -> own/assigned projects per role
/// GET    /{id}               -> detail with viewer context
/// PUT    /{id}               -> edit (poster)
/// DELETE /{id}               -> delete (poster, never-ran projects)
/// POST   /{id}/review        -> university decision
/// POST   /{id}/cancel        -> cancel (poster)
/// POST   /{id}/complete      -> complete (poster)
/// GET    /{id}/students      -> assigned roster
/// POST   /{id}/apply         -> apply (student)
/// GET    /{id}/applications  -> application list (poster)
/// GET    /{id}/milestones    -> milestone list
/// POST   /{id}/milestones    -> add milestone (poster)
/// GET    /{id}/deliverables  -> deliverable list (participants)
/// POST   /{id}/deliverables  -> submit deliverable (assigned student)
/// GET    /{id}/progress      -> milestone progress (participants)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route("/projects/mine", get(project::mine))
        .route(
            "/projects/{id}",
            get(project::get)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/projects/{id}/review", post(project::review))
        .route("/projects/{id}/cancel", post(project::cancel))
        .route("/projects/{id}/complete", post(project::complete))
        .route("/projects/{id}/students", get(project::students))
        .route("/projects/{id}/apply", post(application::apply))
        .route(
            "/projects/{id}/applications",
            get(application::list_for_project),
        )
        .route(
            "/projects/{id}/milestones",
            get(milestone::list).post(milestone::create),
        )
        .route(
            "/projects/{id}/deliverables",
            get(deliverable::list).post(deliverable::submit),
        )
        .route("/projects/{id}/progress", get(dashboard::project_progress))
}
