//! Media asset models and DTOs.
//!
//! One row per uploaded image or video. `thumb_url` is NULL until the
//! thumbnail pipeline has produced a derivative; duplicate cleanup removes
//! NULL-thumbnail rows that have a valid sibling for the same
//! `(owner_id, filename)`.

use mediatheque_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `media_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaAsset {
    pub id: DbId,
    pub owner_id: DbId,
    pub filename: String,
    pub file_type: String,
    pub url: String,
    pub thumb_url: Option<String>,
    pub description: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new media asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMediaAsset {
    /// Overridden with the authenticated caller's id by the API layer.
    #[serde(default)]
    pub owner_id: DbId,
    pub filename: String,
    pub file_type: String,
    pub url: String,
    pub description: Option<String>,
}

/// Aggregate thumbnail coverage for a scope.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct ThumbnailCounts {
    pub total_files: i64,
    pub with_thumbnails: i64,
    pub missing_thumbnails: i64,
}

/// Audit detail for a row removed by duplicate cleanup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeletedDuplicate {
    pub id: DbId,
    pub owner_id: DbId,
    pub filename: String,
}
