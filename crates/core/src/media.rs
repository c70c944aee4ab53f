//! Media asset constants and validation.
//!
//! File-type and filename rules shared by the API layer and the thumbnail
//! engine, plus the reason strings reported by orphan detection.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// File types
// ---------------------------------------------------------------------------

pub const FILE_TYPE_IMAGE: &str = "image";
pub const FILE_TYPE_VIDEO: &str = "video";
pub const VALID_FILE_TYPES: &[&str] = &[FILE_TYPE_IMAGE, FILE_TYPE_VIDEO];

/// Maximum length of an asset filename.
const MAX_FILENAME_LEN: usize = 255;

// ---------------------------------------------------------------------------
// Orphan reasons
// ---------------------------------------------------------------------------

/// The declared source does not exist (404 or missing file).
pub const REASON_SOURCE_MISSING: &str = "source_missing";

/// The source could not be fetched (network or I/O failure).
pub const REASON_FETCH_FAILED: &str = "fetch_failed";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that `ft` is one of the allowed file types.
pub fn validate_file_type(ft: &str) -> Result<(), CoreError> {
    if VALID_FILE_TYPES.contains(&ft) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid file type '{ft}'. Must be one of: {}",
            VALID_FILE_TYPES.join(", ")
        )))
    }
}

/// Validate an asset filename.
///
/// Rules:
/// - Must not be empty.
/// - Must not exceed `MAX_FILENAME_LEN` characters.
/// - Must not contain path separators or parent-directory components.
pub fn validate_filename(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Filename must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_FILENAME_LEN {
        return Err(CoreError::Validation(format!(
            "Filename must not exceed {MAX_FILENAME_LEN} characters"
        )));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(CoreError::Validation(
            "Filename must not contain path separators".to_string(),
        ));
    }
    Ok(())
}

/// Validate the declared source location of an asset.
///
/// Accepts absolute `http`/`https` URLs or library-relative paths. Relative
/// paths must not escape the media root.
pub fn validate_source_url(url: &str) -> Result<(), CoreError> {
    if url.is_empty() {
        return Err(CoreError::Validation(
            "Source url must not be empty".to_string(),
        ));
    }
    if is_remote_source(url) {
        return Ok(());
    }
    if url.starts_with('/') || url.contains("..") {
        return Err(CoreError::Validation(
            "Local source paths must be relative to the media root".to_string(),
        ));
    }
    Ok(())
}

/// Whether a source location is fetched over HTTP rather than read from the
/// local media root.
pub fn is_remote_source(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
