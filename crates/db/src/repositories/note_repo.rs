//! Repository for the `content_notes` table.

use mediatheque_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{ContentNote, CreateContentNote, ExpiredNote};

const COLUMNS: &str =
    "id, owner_id, title, body, note_month, note_year, is_monthly_note, created_at, updated_at";

pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContentNote,
    ) -> Result<ContentNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_notes (owner_id, title, body, note_month, note_year, is_monthly_note)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentNote>(&query)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.note_month)
            .bind(input.note_year)
            .bind(input.is_monthly_note.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// All notes for an owner, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<ContentNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_notes
             WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ContentNote>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Delete all non-recurring notes pinned to the given calendar month.
    ///
    /// Monthly notes and notes targeting any other month are untouched.
    /// Returns one summary per deleted note for audit logging.
    pub async fn delete_for_month(
        pool: &PgPool,
        month: i32,
        year: i32,
    ) -> Result<Vec<ExpiredNote>, sqlx::Error> {
        sqlx::query_as::<_, ExpiredNote>(
            "DELETE FROM content_notes
             WHERE is_monthly_note = FALSE
               AND note_month = $1
               AND note_year = $2
             RETURNING id, owner_id, title",
        )
        .bind(month)
        .bind(year)
        .fetch_all(pool)
        .await
    }
}
