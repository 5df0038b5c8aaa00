//! Route definitions for standalone milestone operations.

use axum::routing::put;
use axum::Router;

use crate::handlers::milestone;
use crate::state::AppState;

/// Routes mounted at `/milestones`.
///
/// ```text
/// PUT    /{id} -> edit (poster)
/// DELETE /{id} -> delete (poster, unapproved only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/milestones/{id}",
        put(milestone::update).delete(milestone::delete),
    )
}
