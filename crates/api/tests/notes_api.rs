//! Integration tests for the manual note-expiry trigger.
//!
//! The expiry pass reads the real clock, so assertions branch on today's
//! day-of-month; both branches pin down the contract (no-op before the
//! 5th, previous-month purge afterwards).

mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use common::{expect_json, mint_token, post_auth};
use mediatheque_core::notes::{previous_month, EXPIRY_EARLIEST_DAY};
use mediatheque_db::models::note::CreateContentNote;
use mediatheque_db::repositories::NoteRepo;
use sqlx::PgPool;

fn new_note(title: &str, month: i32, year: i32, monthly: bool) -> CreateContentNote {
    CreateContentNote {
        owner_id: 1,
        title: title.to_string(),
        body: None,
        note_month: Some(month),
        note_year: Some(year),
        is_monthly_note: Some(monthly),
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expiry_trigger_requires_admin(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());

    let response = post_auth(
        app,
        "/api/v1/notes/expiry/run",
        &mint_token(1, "user"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expiry_trigger_deletes_only_last_months_nonrecurring_notes(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();

    let today = Utc::now().date_naive();
    let (prev_month, prev_year) = previous_month(today.month(), today.year());

    NoteRepo::create(
        &pool,
        &new_note("last month", prev_month as i32, prev_year, false),
    )
    .await
    .unwrap();
    NoteRepo::create(
        &pool,
        &new_note("recurring", prev_month as i32, prev_year, true),
    )
    .await
    .unwrap();
    NoteRepo::create(
        &pool,
        &new_note("current month", today.month() as i32, today.year(), false),
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone(), media.path());
    let json = expect_json(
        post_auth(app, "/api/v1/notes/expiry/run", &mint_token(9, "admin"), None).await,
        StatusCode::OK,
    )
    .await;

    let remaining = NoteRepo::list_by_owner(&pool, 1).await.unwrap();
    let titles: Vec<_> = remaining.iter().map(|n| n.title.as_str()).collect();

    if today.day() >= EXPIRY_EARLIEST_DAY {
        assert_eq!(json["deleted"], 1);
        assert_eq!(json["notes"][0]["title"], "last month");
        assert!(json["reason"].is_null());
        assert!(!titles.contains(&"last month"));
    } else {
        assert_eq!(json["deleted"], 0);
        assert!(json["reason"].is_string());
        assert!(titles.contains(&"last month"));
    }

    // Recurring and current-month notes survive either way.
    assert!(titles.contains(&"recurring"));
    assert!(titles.contains(&"current month"));
}
