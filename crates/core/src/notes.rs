//! Content-note expiry rules.
//!
//! Month-scoped notes are deleted once their month has fully elapsed, but
//! only from the 5th of the following month onwards. Recurring monthly notes
//! are never expired. The date arithmetic lives here so the background job
//! and the manual trigger endpoint share one implementation.

use chrono::{Datelike, NaiveDate};

/// Earliest day of the month on which expiry may run.
pub const EXPIRY_EARLIEST_DAY: u32 = 5;

/// The calendar month immediately preceding `(month, year)`.
///
/// January wraps to December of the previous year.
pub fn previous_month(month: u32, year: i32) -> (u32, i32) {
    if month == 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

/// The `(month, year)` whose non-recurring notes are due for deletion on
/// `today`, or `None` when `today` falls before the 5th.
pub fn expiry_target(today: NaiveDate) -> Option<(u32, i32)> {
    if today.day() < EXPIRY_EARLIEST_DAY {
        return None;
    }
    Some(previous_month(today.month(), today.year()))
}
