//! Route definitions for university-run verification.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::verification;
use crate::state::AppState;

/// Routes mounted at `/verification` (university role).
///
/// ```text
/// GET  /students        -> student queue (own university)
/// POST /students/{id}   -> approve/reject student
/// GET  /companies       -> shared company queue
/// POST /companies/{id}  -> approve/reject company
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/verification/students", get(verification::list_students))
        .route(
            "/verification/students/{id}",
            post(verification::decide_student),
        )
        .route(
            "/verification/companies",
            get(verification::list_companies),
        )
        .route(
            "/verification/companies/{id}",
            post(verification::decide_company),
        )
}
