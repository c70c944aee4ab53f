//! Handler for manually triggering note expiry.

use axum::extract::State;
use axum::Json;
use mediatheque_core::error::CoreError;

use crate::background::note_expiry::{self, ExpiryReport};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/notes/expiry/run
///
/// Run one expiry pass immediately instead of waiting for the background
/// job. Expiry spans all owners, so the endpoint is admin-only. Before the
/// 5th of the month the pass is a no-op and the report carries the reason.
pub async fn run_expiry(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ExpiryReport>> {
    if !auth.is_admin() {
        return Err(CoreError::Forbidden(
            "Note expiry requires the admin role".into(),
        )
        .into());
    }

    let report = note_expiry::run_once(&state.pool).await?;
    Ok(Json(report))
}
