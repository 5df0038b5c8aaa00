//! Route definitions for standalone deliverable operations.

use axum::routing::post;
use axum::Router;

use crate::handlers::deliverable;
use crate::state::AppState;

/// Routes mounted at `/deliverables`.
///
/// ```text
/// POST /{id}/review -> approve / request revision (poster)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/deliverables/{id}/review", post(deliverable::review))
}
