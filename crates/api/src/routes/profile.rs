//! Route definitions for role profiles and the university directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile` and `/universities`.
///
/// ```text
/// GET /universities         -> public directory
/// GET /profile/student      -> own profile (student)
/// PUT /profile/student      -> update (student)
/// GET /profile/company      -> own profile (company)
/// PUT /profile/company      -> update (company)
/// GET /profile/university   -> own profile (university)
/// PUT /profile/university   -> update (university)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/universities", get(profile::list_universities))
        .route(
            "/profile/student",
            get(profile::get_student_profile).put(profile::update_student_profile),
        )
        .route(
            "/profile/company",
            get(profile::get_company_profile).put(profile::update_company_profile),
        )
        .route(
            "/profile/university",
            get(profile::get_university_profile).put(profile::update_university_profile),
        )
}
