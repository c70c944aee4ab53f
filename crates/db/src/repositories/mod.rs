//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod media_asset_repo;
pub mod note_repo;

pub use media_asset_repo::MediaAssetRepo;
pub use note_repo::NoteRepo;
