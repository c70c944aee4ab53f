//! Handlers for thumbnail reconciliation: single and bulk scheduling,
//! coverage status, and orphan detection.
//!
//! Scheduling endpoints return as soon as the work is queued ("scheduled",
//! not "completed"); generation outcomes are observable through the status
//! and orphans endpoints.

use axum::extract::{Path, State};
use axum::Json;
use futures::stream::{self, StreamExt};
use mediatheque_core::thumbnail::completion_percentage;
use mediatheque_core::types::DbId;
use mediatheque_db::repositories::MediaAssetRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::content::find_owned;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// How many sources the orphan scan probes concurrently.
const ORPHAN_PROBE_CONCURRENCY: usize = 8;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for scheduling a single asset.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub ok: bool,
    pub scheduled: bool,
}

/// Response for a bulk rebuild.
#[derive(Debug, Serialize)]
pub struct RebuildResponse {
    pub ok: bool,
    pub files_found: usize,
    pub scheduled: usize,
}

/// Thumbnail coverage for the caller's scope.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub total_files: i64,
    pub with_thumbnails: i64,
    pub missing_thumbnails: i64,
    pub completion_percentage: f64,
}

/// One asset whose source could not be resolved.
#[derive(Debug, Serialize)]
pub struct Orphan {
    pub id: DbId,
    pub filename: String,
    pub url: String,
    pub reason: &'static str,
}

/// Response for the orphan scan.
#[derive(Debug, Serialize)]
pub struct OrphansResponse {
    pub orphans: Vec<Orphan>,
    /// How many missing-thumbnail assets were probed.
    pub checked: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/content/{id}/thumbnail
///
/// Schedule generation for one asset. Safe to call for an asset that
/// already has a thumbnail; regeneration overwrites the derivative.
pub async fn schedule_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScheduleResponse>> {
    let asset = find_owned(&state, &auth, id).await?;

    state.engine.schedule(asset);

    Ok(Json(ScheduleResponse {
        ok: true,
        scheduled: true,
    }))
}

/// POST /api/v1/content/thumbnails/rebuild
///
/// Schedule generation for every asset in scope that is missing a
/// thumbnail. This is the sole retry mechanism for failed generations.
pub async fn rebuild(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<RebuildResponse>> {
    let missing = MediaAssetRepo::missing_thumbnails(&state.pool, auth.owner_scope()).await?;
    let files_found = missing.len();

    for asset in missing {
        state.engine.schedule(asset);
    }

    tracing::info!(
        user_id = auth.user_id,
        files_found,
        "Thumbnail rebuild scheduled"
    );

    Ok(Json(RebuildResponse {
        ok: true,
        files_found,
        scheduled: files_found,
    }))
}

/// GET /api/v1/content/thumbnails/status
///
/// Coverage counts for the caller's scope (global for admins).
pub async fn status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<StatusResponse>> {
    let counts = MediaAssetRepo::thumbnail_counts(&state.pool, auth.owner_scope()).await?;

    Ok(Json(StatusResponse {
        total_files: counts.total_files,
        with_thumbnails: counts.with_thumbnails,
        missing_thumbnails: counts.missing_thumbnails,
        completion_percentage: completion_percentage(counts.with_thumbnails, counts.total_files),
    }))
}

/// GET /api/v1/content/thumbnails/orphans
///
/// Probe the source of every missing-thumbnail asset in scope and report
/// the unreachable ones. Assets that are merely unprocessed (source still
/// resolvable) are not orphans and are omitted.
pub async fn orphans(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<OrphansResponse>> {
    let missing = MediaAssetRepo::missing_thumbnails(&state.pool, auth.owner_scope()).await?;
    let checked = missing.len();

    let engine = &state.engine;
    let orphans: Vec<Orphan> = stream::iter(missing)
        .map(|asset| async move {
            let reason = engine.probe_source(&asset).await?;
            Some(Orphan {
                id: asset.id,
                filename: asset.filename,
                url: asset.url,
                reason,
            })
        })
        .buffer_unordered(ORPHAN_PROBE_CONCURRENCY)
        .filter_map(|orphan| async move { orphan })
        .collect()
        .await;

    Ok(Json(OrphansResponse { orphans, checked }))
}
