//! Route registration.

pub mod application;
pub mod auth;
pub mod dashboard;
pub mod deliverable;
pub mod health;
pub mod milestone;
pub mod profile;
pub mod project;
pub mod verification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
/// /auth/me                               account info (requires auth)
///
/// /universities                          public university directory
///
/// /profile/student                       get, update (student)
/// /profile/company                       get, update (company)
/// /profile/university                    get, update (university)
///
/// /verification/students                 queue (university)
/// /verification/students/{id}            decide (university)
/// /verification/companies                queue (university)
/// /verification/companies/{id}           decide (university)
///
/// /projects                              browse open (GET), post (POST)
/// /projects/mine                         own/assigned projects per role
/// /projects/{id}                         detail, edit (PUT), delete
/// /projects/{id}/review                  university decision (POST)
/// /projects/{id}/cancel                  poster cancel (POST)
/// /projects/{id}/complete                poster completion (POST)
/// /projects/{id}/students                assigned roster (GET)
/// /projects/{id}/apply                   student application (POST)
/// /projects/{id}/applications            poster application list (GET)
/// /projects/{id}/milestones              list (GET), add (POST)
/// /projects/{id}/deliverables            list (GET), submit (POST)
/// /projects/{id}/progress                milestone progress (GET)
///
/// /applications/mine                     student's applications (GET)
/// /applications/{id}/act                 poster decision (POST)
/// /applications/{id}/withdraw            student withdrawal (POST)
///
/// /milestones/{id}                       edit (PUT), delete
/// /deliverables/{id}/review              poster review (POST)
///
/// /dashboard                             role-shaped counters (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(profile::router())
        .merge(verification::router())
        .merge(project::router())
        .merge(application::router())
        .merge(milestone::router())
        .merge(deliverable::router())
        .merge(dashboard::router())
}
