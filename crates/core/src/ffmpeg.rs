//! FFmpeg frame extraction for video assets.
//!
//! Video thumbnails are produced by grabbing the first frame with the
//! `ffmpeg` binary and feeding the resulting JPEG through the same image
//! pipeline used for still sources.

use std::path::Path;

/// Error type for FFmpeg operations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("video file not found: {0}")]
    VideoNotFound(String),
}

/// Extract the first frame of a video as a JPEG.
///
/// Writes the frame to `output_path`. The frame is extracted at full source
/// resolution; cropping and resizing happen downstream in the image
/// pipeline.
pub async fn extract_first_frame(
    video_path: &Path,
    output_path: &Path,
) -> Result<(), FfmpegError> {
    if !video_path.exists() {
        return Err(FfmpegError::VideoNotFound(
            video_path.to_string_lossy().to_string(),
        ));
    }

    let output = tokio::process::Command::new("ffmpeg")
        .args(["-y", "-ss", "0", "-i"])
        .arg(video_path)
        .args(["-vframes", "1", "-q:v", "2"])
        .arg(output_path)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}
