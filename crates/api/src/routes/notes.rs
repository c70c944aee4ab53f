//! Route definitions for the `/notes` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// POST /expiry/run -> run_expiry (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/expiry/run", post(notes::run_expiry))
}
