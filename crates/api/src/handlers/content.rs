//! Handlers for the `/content` resource: asset registration, the pending
//! gallery listing, thumbnail bytes, and deletion.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use mediatheque_core::error::CoreError;
use mediatheque_core::media;
use mediatheque_core::pagination::{
    clamp_limit, clamp_offset, has_more, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use mediatheque_core::thumbnail::THUMBNAIL_CONTENT_TYPE;
use mediatheque_core::types::{DbId, Timestamp};
use mediatheque_db::models::media_asset::{CreateMediaAsset, MediaAsset};
use mediatheque_db::repositories::MediaAssetRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One asset in the pending gallery listing.
#[derive(Debug, Serialize)]
pub struct PendingItem {
    pub id: DbId,
    pub filename: String,
    pub file_type: String,
    pub url: String,
    pub thumb_url: Option<String>,
    pub description: Option<String>,
    pub uploaded_at: Timestamp,
}

impl From<MediaAsset> for PendingItem {
    fn from(asset: MediaAsset) -> Self {
        Self {
            id: asset.id,
            filename: asset.filename,
            file_type: asset.file_type,
            url: asset.url,
            thumb_url: asset.thumb_url,
            description: asset.description,
            uploaded_at: asset.created_at,
        }
    }
}

/// Paginated pending gallery response.
#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub items: Vec<PendingItem>,
    pub total: i64,
    pub has_more: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/content
///
/// Register an uploaded asset and schedule its thumbnail in the background.
/// Overrides `input.owner_id` with the authenticated caller.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateMediaAsset>,
) -> AppResult<(StatusCode, Json<MediaAsset>)> {
    media::validate_filename(&input.filename)?;
    media::validate_file_type(&input.file_type)?;
    media::validate_source_url(&input.url)?;

    input.owner_id = auth.user_id;
    let asset = MediaAssetRepo::create(&state.pool, &input).await?;

    state.engine.schedule(asset.clone());

    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /api/v1/content/pending
///
/// The caller's live assets, newest first, with pagination metadata.
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PendingQuery>,
) -> AppResult<Json<PendingResponse>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let assets = MediaAssetRepo::list_pending(&state.pool, auth.user_id, limit, offset).await?;
    let total = MediaAssetRepo::count_pending(&state.pool, auth.user_id).await?;
    let more = has_more(total, offset, assets.len());

    Ok(Json(PendingResponse {
        items: assets.into_iter().map(PendingItem::from).collect(),
        total,
        has_more: more,
    }))
}

/// GET /api/v1/content/{id}/thumb
///
/// The generated thumbnail bytes. 404 until generation has completed, or
/// when the derivative file has gone missing.
pub async fn get_thumb(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = find_owned(&state, &auth, id).await?;

    if asset.thumb_url.is_none() {
        return Err(not_found(id));
    }

    let bytes = tokio::fs::read(state.engine.thumb_path(id))
        .await
        .map_err(|_| not_found(id))?;

    Ok(([(header::CONTENT_TYPE, THUMBNAIL_CONTENT_TYPE)], bytes))
}

/// DELETE /api/v1/content/{id}
///
/// Soft-delete the asset row and best-effort remove its derivative file.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MediaAssetRepo::soft_delete(&state.pool, id, auth.owner_scope()).await?;
    if !deleted {
        return Err(not_found(id));
    }

    if let Err(e) = tokio::fs::remove_file(state.engine.thumb_path(id)).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(asset_id = id, error = %e, "Failed to remove thumbnail file");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a live asset the caller may access, or 404.
///
/// Non-admin callers only see their own rows; an existing row belonging to
/// someone else is indistinguishable from a missing one.
pub(crate) async fn find_owned(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> Result<MediaAsset, AppError> {
    let asset = MediaAssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !auth.is_admin() && asset.owner_id != auth.user_id {
        return Err(not_found(id));
    }

    Ok(asset)
}

pub(crate) fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MediaAsset",
        id,
    })
}
