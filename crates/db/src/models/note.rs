//! Content note models and DTOs.

use mediatheque_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `content_notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentNote {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub body: Option<String>,
    /// Calendar month the note targets (1-12), or NULL for undated notes.
    pub note_month: Option<i32>,
    pub note_year: Option<i32>,
    /// Recurring notes are exempt from periodic expiry.
    pub is_monthly_note: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentNote {
    #[serde(default)]
    pub owner_id: DbId,
    pub title: String,
    pub body: Option<String>,
    pub note_month: Option<i32>,
    pub note_year: Option<i32>,
    pub is_monthly_note: Option<bool>,
}

/// Summary of a note removed by expiry, kept for audit logging.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExpiredNote {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
}
