//! Background thumbnail generation.
//!
//! Each asset is processed by an independent task spawned via
//! `tokio::spawn`; a semaphore bounds how many tasks fetch and render at
//! once. Failures are logged and leave the asset in the "missing
//! thumbnail" state; the only retry path is an explicit rebuild call.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use mediatheque_core::ffmpeg::{self, FfmpegError};
use mediatheque_core::media;
use mediatheque_core::thumbnail::{self, ThumbnailError};
use mediatheque_core::types::DbId;
use mediatheque_db::models::media_asset::MediaAsset;
use mediatheque_db::repositories::MediaAssetRepo;
use sqlx::PgPool;
use tokio::sync::Semaphore;

use crate::config::ServerConfig;

/// Delay before the single bounded retry of a failed source fetch.
const FETCH_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Error type for one generation attempt.
///
/// Never surfaces to an HTTP caller; the scheduling request has already
/// returned by the time generation runs.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("source missing: {0}")]
    SourceMissing(String),

    #[error("source fetch failed: {0}")]
    Fetch(String),

    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),

    #[error(transparent)]
    Ffmpeg(#[from] FfmpegError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("asset row deleted during generation")]
    RowGone,
}

impl GenerateError {
    /// Whether this failure means the declared source does not resolve
    /// (as opposed to a transient or internal error).
    pub fn is_source_missing(&self) -> bool {
        matches!(self, GenerateError::SourceMissing(_))
    }
}

/// Thumbnail generation engine shared across requests via [`crate::state::AppState`].
///
/// Cheaply cloneable: the pool, HTTP client, and worker semaphore are all
/// internally reference-counted.
#[derive(Clone)]
pub struct ThumbnailEngine {
    pool: PgPool,
    media_root: PathBuf,
    public_base_url: String,
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

impl ThumbnailEngine {
    /// Build the engine from server configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed, which is the desired
    /// fail-fast behaviour at startup.
    pub fn new(pool: PgPool, config: &ServerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.source_fetch_timeout_secs))
            .build()
            .expect("Failed to build source-fetch HTTP client");

        Self {
            pool,
            media_root: config.media_root.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            client,
            permits: Arc::new(Semaphore::new(config.thumbnail_workers)),
        }
    }

    /// Schedule fire-and-forget generation for one asset.
    ///
    /// Returns immediately; the spawned task waits for a worker permit, so
    /// callers may schedule arbitrarily many assets without unbounded
    /// concurrent fetches.
    pub fn schedule(&self, asset: MediaAsset) {
        let engine = self.clone();
        tokio::spawn(async move {
            let _permit = match engine.permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                // Closed semaphore means the engine is being torn down.
                Err(_) => return,
            };

            match engine.generate(&asset).await {
                Ok(url) => {
                    tracing::info!(asset_id = asset.id, thumb_url = %url, "Thumbnail generated");
                }
                Err(e) if e.is_source_missing() => {
                    tracing::warn!(asset_id = asset.id, url = %asset.url, "Thumbnail source missing");
                }
                Err(e) => {
                    tracing::warn!(asset_id = asset.id, error = %e, "Thumbnail generation failed");
                }
            }
        });
    }

    /// Generate and persist the thumbnail for one asset.
    ///
    /// Idempotent: regenerating overwrites the derivative file and re-writes
    /// `thumb_url`; no second row or file is ever created. Returns the
    /// public thumbnail address.
    pub async fn generate(&self, asset: &MediaAsset) -> Result<String, GenerateError> {
        let source = self.load_source(asset).await?;

        let webp =
            tokio::task::spawn_blocking(move || thumbnail::render_square_thumbnail(&source))
                .await??;

        let path = self.thumb_path(asset.id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &webp).await?;

        let url = self.public_thumb_url(asset.id);
        let updated = MediaAssetRepo::set_thumbnail(&self.pool, asset.id, &url).await?;
        if !updated {
            // The row was deleted while we were rendering; drop the orphaned
            // derivative file again.
            let _ = tokio::fs::remove_file(&path).await;
            return Err(GenerateError::RowGone);
        }

        Ok(url)
    }

    /// Probe whether an asset's declared source resolves.
    ///
    /// Returns `None` when reachable, or the orphan reason otherwise.
    pub async fn probe_source(&self, asset: &MediaAsset) -> Option<&'static str> {
        if media::is_remote_source(&asset.url) {
            match self.client.head(&asset.url).send().await {
                Ok(resp) if resp.status().is_success() => None,
                Ok(resp) if resp.status() == reqwest::StatusCode::NOT_FOUND => {
                    Some(media::REASON_SOURCE_MISSING)
                }
                Ok(_) | Err(_) => Some(media::REASON_FETCH_FAILED),
            }
        } else {
            match tokio::fs::metadata(self.media_root.join(&asset.url)).await {
                Ok(_) => None,
                Err(e) if e.kind() == ErrorKind::NotFound => Some(media::REASON_SOURCE_MISSING),
                Err(_) => Some(media::REASON_FETCH_FAILED),
            }
        }
    }

    /// Filesystem location of an asset's derivative.
    pub fn thumb_path(&self, asset_id: DbId) -> PathBuf {
        self.thumbs_dir().join(thumbnail::thumbnail_filename(asset_id))
    }

    /// Public address written onto the asset row.
    pub fn public_thumb_url(&self, asset_id: DbId) -> String {
        format!("{}/api/v1/content/{asset_id}/thumb", self.public_base_url)
    }

    fn thumbs_dir(&self) -> PathBuf {
        self.media_root.join("thumbs")
    }

    // -- Source loading -----------------------------------------------------

    async fn load_source(&self, asset: &MediaAsset) -> Result<Vec<u8>, GenerateError> {
        if asset.file_type == media::FILE_TYPE_VIDEO {
            return self.load_video_frame(asset).await;
        }

        if media::is_remote_source(&asset.url) {
            self.fetch_remote(&asset.url).await
        } else {
            read_local(&self.media_root.join(&asset.url), &asset.url).await
        }
    }

    /// Fetch a remote source with one bounded retry with backoff.
    ///
    /// A 404 is terminal (the source is gone; retrying cannot help); other
    /// failures get a single second attempt.
    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, GenerateError> {
        let mut last_err = String::new();

        for attempt in 0u32..2 {
            if attempt > 0 {
                tokio::time::sleep(FETCH_RETRY_DELAY).await;
            }

            match self.client.get(url).send().await {
                Ok(resp) if resp.status() == reqwest::StatusCode::NOT_FOUND => {
                    return Err(GenerateError::SourceMissing(url.to_string()));
                }
                Ok(resp) => match resp.error_for_status() {
                    Ok(resp) => match resp.bytes().await {
                        Ok(bytes) => return Ok(bytes.to_vec()),
                        Err(e) => last_err = e.to_string(),
                    },
                    Err(e) => last_err = e.to_string(),
                },
                Err(e) => last_err = e.to_string(),
            }

            tracing::debug!(url, attempt, error = %last_err, "Source fetch attempt failed");
        }

        Err(GenerateError::Fetch(last_err))
    }

    /// Resolve a video source to a local file and extract its first frame.
    async fn load_video_frame(&self, asset: &MediaAsset) -> Result<Vec<u8>, GenerateError> {
        tokio::fs::create_dir_all(self.thumbs_dir()).await?;

        // Remote videos are downloaded next to the derivative and removed
        // once the frame has been extracted.
        let (video_path, downloaded) = if media::is_remote_source(&asset.url) {
            let bytes = self.fetch_remote(&asset.url).await?;
            let tmp = self.thumbs_dir().join(format!("{}.src.tmp", asset.id));
            tokio::fs::write(&tmp, &bytes).await?;
            (tmp.clone(), Some(tmp))
        } else {
            (self.media_root.join(&asset.url), None)
        };

        let frame_path = self.thumbs_dir().join(format!("{}.frame.jpg", asset.id));
        let result = ffmpeg::extract_first_frame(&video_path, &frame_path).await;

        if let Some(tmp) = downloaded {
            let _ = tokio::fs::remove_file(tmp).await;
        }

        match result {
            Ok(()) => {
                let bytes = tokio::fs::read(&frame_path).await?;
                let _ = tokio::fs::remove_file(&frame_path).await;
                Ok(bytes)
            }
            Err(FfmpegError::VideoNotFound(path)) => Err(GenerateError::SourceMissing(path)),
            Err(e) => Err(e.into()),
        }
    }
}

async fn read_local(path: &Path, declared: &str) -> Result<Vec<u8>, GenerateError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(GenerateError::SourceMissing(declared.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
