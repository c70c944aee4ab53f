//! Domain logic for the mediatheque backend.
//!
//! Pure functions and types with zero internal dependencies: image
//! thumbnail rendering, ffmpeg frame extraction, note expiry date
//! arithmetic, pagination clamps, and the shared error type. Database
//! access and HTTP concerns live in `mediatheque-db` and
//! `mediatheque-api` respectively.

pub mod error;
pub mod ffmpeg;
pub mod media;
pub mod notes;
pub mod pagination;
pub mod thumbnail;
pub mod types;
