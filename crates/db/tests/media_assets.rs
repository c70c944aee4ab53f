//! Integration tests for the media asset repository.
//!
//! Exercises the repository against a real database to verify:
//! - creation and lookup of asset rows
//! - thumbnail writes are idempotent and never create extra rows
//! - pagination ordering and counts
//! - coverage counts (total / with / missing)
//! - soft-deleted rows are hidden everywhere
//! - duplicate cleanup removes exactly the redundant rows

use mediatheque_db::models::media_asset::CreateMediaAsset;
use mediatheque_db::repositories::MediaAssetRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_asset(owner_id: i64, filename: &str) -> CreateMediaAsset {
    CreateMediaAsset {
        owner_id,
        filename: filename.to_string(),
        file_type: "image".to_string(),
        url: format!("uploads/{filename}"),
        description: None,
    }
}

// ---------------------------------------------------------------------------
// Create / find
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_starts_without_thumbnail(pool: PgPool) {
    let asset = MediaAssetRepo::create(&pool, &new_asset(1, "a.jpg"))
        .await
        .unwrap();

    assert_eq!(asset.owner_id, 1);
    assert_eq!(asset.filename, "a.jpg");
    assert!(asset.thumb_url.is_none());
    assert!(asset.deleted_at.is_none());

    let found = MediaAssetRepo::find_by_id(&pool, asset.id).await.unwrap();
    assert!(found.is_some());
}

#[sqlx::test]
async fn find_by_id_returns_none_for_unknown(pool: PgPool) {
    let found = MediaAssetRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Thumbnail writes
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn set_thumbnail_overwrites_without_new_rows(pool: PgPool) {
    let asset = MediaAssetRepo::create(&pool, &new_asset(1, "a.jpg"))
        .await
        .unwrap();

    assert!(MediaAssetRepo::set_thumbnail(&pool, asset.id, "https://cdn/1.webp")
        .await
        .unwrap());
    assert!(MediaAssetRepo::set_thumbnail(&pool, asset.id, "https://cdn/1.webp")
        .await
        .unwrap());

    let found = MediaAssetRepo::find_by_id(&pool, asset.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.thumb_url.as_deref(), Some("https://cdn/1.webp"));

    let count = MediaAssetRepo::count_pending(&pool, 1).await.unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn set_thumbnail_skips_deleted_rows(pool: PgPool) {
    let asset = MediaAssetRepo::create(&pool, &new_asset(1, "a.jpg"))
        .await
        .unwrap();
    assert!(MediaAssetRepo::soft_delete(&pool, asset.id, None).await.unwrap());

    let updated = MediaAssetRepo::set_thumbnail(&pool, asset.id, "https://cdn/1.webp")
        .await
        .unwrap();
    assert!(!updated);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn list_pending_pages_newest_first(pool: PgPool) {
    for i in 0..5 {
        MediaAssetRepo::create(&pool, &new_asset(7, &format!("f{i}.jpg")))
            .await
            .unwrap();
    }
    // Another owner's rows must not leak into the page.
    MediaAssetRepo::create(&pool, &new_asset(8, "other.jpg"))
        .await
        .unwrap();

    let page1 = MediaAssetRepo::list_pending(&pool, 7, 2, 0).await.unwrap();
    let page2 = MediaAssetRepo::list_pending(&pool, 7, 2, 2).await.unwrap();
    let page3 = MediaAssetRepo::list_pending(&pool, 7, 2, 4).await.unwrap();

    assert_eq!(page1.len(), 2);
    assert_eq!(page2.len(), 2);
    assert_eq!(page3.len(), 1);
    // Newest first: the last insert leads the first page.
    assert_eq!(page1[0].filename, "f4.jpg");
    assert_eq!(page3[0].filename, "f0.jpg");

    let total = MediaAssetRepo::count_pending(&pool, 7).await.unwrap();
    assert_eq!(total, 5);
}

// ---------------------------------------------------------------------------
// Coverage counts
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn thumbnail_counts_split_by_coverage(pool: PgPool) {
    for i in 0..4 {
        let asset = MediaAssetRepo::create(&pool, &new_asset(1, &format!("f{i}.jpg")))
            .await
            .unwrap();
        if i < 3 {
            MediaAssetRepo::set_thumbnail(&pool, asset.id, "https://cdn/x.webp")
                .await
                .unwrap();
        }
    }

    let counts = MediaAssetRepo::thumbnail_counts(&pool, Some(1)).await.unwrap();
    assert_eq!(counts.total_files, 4);
    assert_eq!(counts.with_thumbnails, 3);
    assert_eq!(counts.missing_thumbnails, 1);
    assert_eq!(
        counts.total_files,
        counts.with_thumbnails + counts.missing_thumbnails
    );
}

#[sqlx::test]
async fn thumbnail_counts_global_scope_spans_owners(pool: PgPool) {
    MediaAssetRepo::create(&pool, &new_asset(1, "a.jpg")).await.unwrap();
    MediaAssetRepo::create(&pool, &new_asset(2, "b.jpg")).await.unwrap();

    let global = MediaAssetRepo::thumbnail_counts(&pool, None).await.unwrap();
    assert_eq!(global.total_files, 2);

    let scoped = MediaAssetRepo::thumbnail_counts(&pool, Some(1)).await.unwrap();
    assert_eq!(scoped.total_files, 1);
}

#[sqlx::test]
async fn thumbnail_counts_empty_scope_is_all_zero(pool: PgPool) {
    let counts = MediaAssetRepo::thumbnail_counts(&pool, Some(42)).await.unwrap();
    assert_eq!(counts.total_files, 0);
    assert_eq!(counts.with_thumbnails, 0);
    assert_eq!(counts.missing_thumbnails, 0);
}

#[sqlx::test]
async fn missing_thumbnails_lists_only_uncovered_rows(pool: PgPool) {
    let covered = MediaAssetRepo::create(&pool, &new_asset(1, "a.jpg"))
        .await
        .unwrap();
    MediaAssetRepo::set_thumbnail(&pool, covered.id, "https://cdn/a.webp")
        .await
        .unwrap();
    let missing = MediaAssetRepo::create(&pool, &new_asset(1, "b.jpg"))
        .await
        .unwrap();

    let rows = MediaAssetRepo::missing_thumbnails(&pool, Some(1)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, missing.id);
}

// ---------------------------------------------------------------------------
// Soft delete
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn soft_delete_hides_row_and_is_idempotent(pool: PgPool) {
    let asset = MediaAssetRepo::create(&pool, &new_asset(1, "a.jpg"))
        .await
        .unwrap();

    assert!(MediaAssetRepo::soft_delete(&pool, asset.id, Some(1)).await.unwrap());
    assert!(!MediaAssetRepo::soft_delete(&pool, asset.id, Some(1)).await.unwrap());

    assert!(MediaAssetRepo::find_by_id(&pool, asset.id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(MediaAssetRepo::count_pending(&pool, 1).await.unwrap(), 0);
}

#[sqlx::test]
async fn soft_delete_respects_owner_scope(pool: PgPool) {
    let asset = MediaAssetRepo::create(&pool, &new_asset(1, "a.jpg"))
        .await
        .unwrap();

    // A different owner cannot delete the row.
    assert!(!MediaAssetRepo::soft_delete(&pool, asset.id, Some(2)).await.unwrap());
    assert!(MediaAssetRepo::find_by_id(&pool, asset.id)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Duplicate cleanup
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn cleanup_removes_null_rows_with_a_valid_sibling(pool: PgPool) {
    let valid = MediaAssetRepo::create(&pool, &new_asset(1, "dup.jpg"))
        .await
        .unwrap();
    MediaAssetRepo::set_thumbnail(&pool, valid.id, "https://cdn/dup.webp")
        .await
        .unwrap();
    let stale = MediaAssetRepo::create(&pool, &new_asset(1, "dup.jpg"))
        .await
        .unwrap();

    let deleted = MediaAssetRepo::delete_duplicates(&pool, Some(1)).await.unwrap();

    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].id, stale.id);
    assert_eq!(deleted[0].filename, "dup.jpg");

    // Exactly the valid row remains.
    assert!(MediaAssetRepo::find_by_id(&pool, valid.id)
        .await
        .unwrap()
        .is_some());
    assert!(MediaAssetRepo::find_by_id(&pool, stale.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn cleanup_leaves_groups_with_no_valid_thumbnail(pool: PgPool) {
    MediaAssetRepo::create(&pool, &new_asset(1, "dup.jpg")).await.unwrap();
    MediaAssetRepo::create(&pool, &new_asset(1, "dup.jpg")).await.unwrap();

    let deleted = MediaAssetRepo::delete_duplicates(&pool, Some(1)).await.unwrap();

    assert!(deleted.is_empty());
    assert_eq!(MediaAssetRepo::count_pending(&pool, 1).await.unwrap(), 2);
}

#[sqlx::test]
async fn cleanup_does_not_cross_owner_boundaries(pool: PgPool) {
    // Owner 1 has the valid copy; owner 2's NULL row shares the filename
    // but is not a duplicate of it.
    let valid = MediaAssetRepo::create(&pool, &new_asset(1, "dup.jpg"))
        .await
        .unwrap();
    MediaAssetRepo::set_thumbnail(&pool, valid.id, "https://cdn/dup.webp")
        .await
        .unwrap();
    MediaAssetRepo::create(&pool, &new_asset(2, "dup.jpg")).await.unwrap();

    let deleted = MediaAssetRepo::delete_duplicates(&pool, None).await.unwrap();
    assert!(deleted.is_empty());
}

#[sqlx::test]
async fn cleanup_scope_limits_to_one_owner(pool: PgPool) {
    for owner in [1i64, 2] {
        let valid = MediaAssetRepo::create(&pool, &new_asset(owner, "dup.jpg"))
            .await
            .unwrap();
        MediaAssetRepo::set_thumbnail(&pool, valid.id, "https://cdn/dup.webp")
            .await
            .unwrap();
        MediaAssetRepo::create(&pool, &new_asset(owner, "dup.jpg"))
            .await
            .unwrap();
    }

    let deleted = MediaAssetRepo::delete_duplicates(&pool, Some(1)).await.unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].owner_id, 1);

    // Owner 2's redundant row is still there until a global run.
    let remaining = MediaAssetRepo::delete_duplicates(&pool, None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].owner_id, 2);
}
