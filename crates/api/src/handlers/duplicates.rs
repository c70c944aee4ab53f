//! Handler for duplicate asset cleanup.

use axum::extract::State;
use axum::Json;
use mediatheque_db::models::media_asset::DeletedDuplicate;
use mediatheque_db::repositories::MediaAssetRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response for a cleanup run.
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub deleted: usize,
    pub details: Vec<DeletedDuplicate>,
}

/// POST /api/v1/content/duplicates/cleanup
///
/// Remove redundant rows: within each `(owner, filename)` group that has a
/// valid thumbnail, every row still missing one is deleted. Groups where no
/// row has a thumbnail are intentionally left alone. Admins clean the whole
/// collection; other callers only their own assets.
pub async fn cleanup(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<CleanupResponse>> {
    let deleted = MediaAssetRepo::delete_duplicates(&state.pool, auth.owner_scope()).await?;

    for row in &deleted {
        tracing::info!(
            asset_id = row.id,
            owner_id = row.owner_id,
            filename = %row.filename,
            "Duplicate asset removed"
        );
    }

    Ok(Json(CleanupResponse {
        deleted: deleted.len(),
        details: deleted,
    }))
}
