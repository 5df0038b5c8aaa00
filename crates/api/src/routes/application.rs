//! Route definitions for the `/applications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET  /mine            -> student's own applications
/// POST /{id}/act        -> accept/reject/shortlist (poster)
/// POST /{id}/withdraw   -> withdraw (student)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/applications/mine", get(application::mine))
        .route("/applications/{id}/act", post(application::act))
        .route("/applications/{id}/withdraw", post(application::withdraw))
}
