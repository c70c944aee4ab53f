//! Periodic expiry of month-scoped content notes.
//!
//! Deletes non-recurring notes for the previous calendar month once the 5th
//! of the current month has been reached. Runs on a fixed interval using
//! `tokio::time::interval`; each tick is a no-op until a run is due. The
//! same pass can be triggered manually through the API.

use std::time::Duration;

use chrono::{Datelike, Utc};
use mediatheque_core::notes;
use mediatheque_db::models::note::ExpiredNote;
use mediatheque_db::repositories::NoteRepo;
use serde::Serialize;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the expiry job wakes up.
const CHECK_INTERVAL: Duration = Duration::from_secs(6 * 3600); // 6 hours

/// Outcome of one expiry pass.
#[derive(Debug, Serialize)]
pub struct ExpiryReport {
    /// Number of notes deleted.
    pub deleted: usize,
    /// Summaries of the deleted notes, for audit logging.
    pub notes: Vec<ExpiredNote>,
    /// Set when the pass did nothing and why.
    pub reason: Option<String>,
}

/// Run one expiry pass against the current date.
///
/// Before the 5th of the month this is a no-op that reports the reason;
/// from the 5th onwards it deletes every non-recurring note pinned to the
/// previous calendar month (January targets December of the prior year).
pub async fn run_once(pool: &PgPool) -> Result<ExpiryReport, sqlx::Error> {
    let today = Utc::now().date_naive();

    let Some((month, year)) = notes::expiry_target(today) else {
        return Ok(ExpiryReport {
            deleted: 0,
            notes: Vec::new(),
            reason: Some(format!(
                "Expiry runs from day {} of the month; today is day {}",
                notes::EXPIRY_EARLIEST_DAY,
                today.day()
            )),
        });
    };

    let deleted = NoteRepo::delete_for_month(pool, month as i32, year).await?;

    for note in &deleted {
        tracing::info!(
            note_id = note.id,
            owner_id = note.owner_id,
            title = %note.title,
            "Note expired"
        );
    }

    Ok(ExpiryReport {
        deleted: deleted.len(),
        notes: deleted,
        reason: None,
    })
}

/// Run the note expiry loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = CHECK_INTERVAL.as_secs(),
        "Note expiry job started"
    );

    let mut interval = tokio::time::interval(CHECK_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Note expiry job stopping");
                break;
            }
            _ = interval.tick() => {
                match run_once(&pool).await {
                    Ok(report) if report.deleted > 0 => {
                        tracing::info!(deleted = report.deleted, "Note expiry: purged notes");
                    }
                    Ok(report) => match report.reason {
                        Some(reason) => tracing::debug!(%reason, "Note expiry: skipped"),
                        None => tracing::debug!("Note expiry: nothing to purge"),
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "Note expiry: pass failed");
                    }
                }
            }
        }
    }
}
