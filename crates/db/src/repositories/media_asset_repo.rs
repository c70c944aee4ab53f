//! Repository for the `media_assets` table.

use mediatheque_core::types::DbId;
use sqlx::PgPool;

use crate::models::media_asset::{
    CreateMediaAsset, DeletedDuplicate, MediaAsset, ThumbnailCounts,
};

const COLUMNS: &str =
    "id, owner_id, filename, file_type, url, thumb_url, description, deleted_at, created_at, updated_at";

pub struct MediaAssetRepo;

impl MediaAssetRepo {
    /// Insert a new asset row. `thumb_url` starts NULL.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaAsset,
    ) -> Result<MediaAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_assets (owner_id, filename, file_type, url, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(input.owner_id)
            .bind(&input.filename)
            .bind(&input.file_type)
            .bind(&input.url)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a live (not soft-deleted) asset by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM media_assets WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page through an owner's live assets, newest first.
    pub async fn list_pending(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_assets
             WHERE owner_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total live assets for an owner (pagination metadata).
    pub async fn count_pending(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM media_assets WHERE owner_id = $1 AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }

    /// Write the generated thumbnail address onto a row.
    ///
    /// Idempotent: regenerating simply overwrites the previous value.
    /// Returns `false` when the row does not exist or is soft-deleted.
    pub async fn set_thumbnail(
        pool: &PgPool,
        id: DbId,
        thumb_url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE media_assets
             SET thumb_url = $2, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(thumb_url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All live assets missing a thumbnail, optionally scoped to one owner.
    pub async fn missing_thumbnails(
        pool: &PgPool,
        owner_id: Option<DbId>,
    ) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_assets
             WHERE thumb_url IS NULL AND deleted_at IS NULL
               AND ($1::BIGINT IS NULL OR owner_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Thumbnail coverage counts for a scope (global when `owner_id` is
    /// `None`).
    pub async fn thumbnail_counts(
        pool: &PgPool,
        owner_id: Option<DbId>,
    ) -> Result<ThumbnailCounts, sqlx::Error> {
        sqlx::query_as::<_, ThumbnailCounts>(
            "SELECT COUNT(*) AS total_files,
                    COUNT(thumb_url) AS with_thumbnails,
                    COUNT(*) FILTER (WHERE thumb_url IS NULL) AS missing_thumbnails
             FROM media_assets
             WHERE deleted_at IS NULL
               AND ($1::BIGINT IS NULL OR owner_id = $1)",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }

    /// Soft-delete a live asset. When `owner_id` is given the delete only
    /// applies if the row belongs to that owner. Idempotent: a second call
    /// returns `false`.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        owner_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE media_assets
             SET deleted_at = now(), updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
               AND ($2::BIGINT IS NULL OR owner_id = $2)",
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove redundant duplicate rows.
    ///
    /// Within each live `(owner_id, filename)` group that has at least one
    /// row with a valid thumbnail, every NULL-thumbnail row is deleted.
    /// Groups where no row has a thumbnail are left untouched. Returns one
    /// audit record per deleted row.
    pub async fn delete_duplicates(
        pool: &PgPool,
        owner_id: Option<DbId>,
    ) -> Result<Vec<DeletedDuplicate>, sqlx::Error> {
        sqlx::query_as::<_, DeletedDuplicate>(
            "DELETE FROM media_assets a
             WHERE a.thumb_url IS NULL
               AND a.deleted_at IS NULL
               AND ($1::BIGINT IS NULL OR a.owner_id = $1)
               AND EXISTS (
                   SELECT 1 FROM media_assets b
                   WHERE b.owner_id = a.owner_id
                     AND b.filename = a.filename
                     AND b.id <> a.id
                     AND b.thumb_url IS NOT NULL
                     AND b.deleted_at IS NULL
               )
             RETURNING a.id, a.owner_id, a.filename",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }
}
