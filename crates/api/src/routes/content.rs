//! Route definitions for the `/content` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{content, duplicates, thumbnails};
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// POST   /                        -> create
/// GET    /pending                 -> list_pending  (?limit=&offset=)
/// DELETE /{id}                    -> delete
/// GET    /{id}/thumb              -> get_thumb
/// POST   /{id}/thumbnail          -> schedule_one
/// POST   /thumbnails/rebuild      -> rebuild
/// GET    /thumbnails/status       -> status
/// GET    /thumbnails/orphans      -> orphans
/// POST   /duplicates/cleanup      -> cleanup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(content::create))
        .route("/pending", get(content::list_pending))
        .route("/{id}", delete(content::delete))
        .route("/{id}/thumb", get(content::get_thumb))
        .route("/{id}/thumbnail", post(thumbnails::schedule_one))
        .route("/thumbnails/rebuild", post(thumbnails::rebuild))
        .route("/thumbnails/status", get(thumbnails::status))
        .route("/thumbnails/orphans", get(thumbnails::orphans))
        .route("/duplicates/cleanup", post(duplicates::cleanup))
}
