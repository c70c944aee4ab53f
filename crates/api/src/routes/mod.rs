//! Route tree assembly.

pub mod content;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /content                              register asset (POST)
/// /content/pending                      caller's gallery (GET)
/// /content/{id}                         soft delete (DELETE)
/// /content/{id}/thumb                   thumbnail bytes (GET)
/// /content/{id}/thumbnail               schedule generation (POST)
/// /content/thumbnails/rebuild           bulk-schedule missing (POST)
/// /content/thumbnails/status            coverage counts (GET)
/// /content/thumbnails/orphans           unreachable sources (GET)
/// /content/duplicates/cleanup           remove redundant rows (POST)
///
/// /notes/expiry/run                     run expiry pass now (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/content", content::router())
        .nest("/notes", notes::router())
}
