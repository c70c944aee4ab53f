//! Thumbnail generation engine.
//!
//! Fire-and-forget background generation with a bounded worker pool. The
//! pure image logic lives in `mediatheque_core::thumbnail`; this module owns
//! source fetching, persistence, and scheduling.

pub mod thumbnailer;

pub use thumbnailer::{GenerateError, ThumbnailEngine};
