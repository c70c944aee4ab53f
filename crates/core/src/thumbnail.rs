//! Square thumbnail rendering and completion accounting.
//!
//! Pure image-in/bytes-out logic: decode a source image, honour its EXIF
//! orientation, center-crop to a square, resize to the target edge, and
//! encode as WEBP. The engine in the API crate is responsible for fetching
//! source bytes and persisting the result.

use std::io::Cursor;

use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageDecoder, ImageReader};

/// Edge length of a generated thumbnail, in pixels.
pub const THUMBNAIL_EDGE: u32 = 320;

/// Content type of generated thumbnails.
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/webp";

/// Deterministic derivative filename for an asset id.
pub fn thumbnail_filename(asset_id: i64) -> String {
    format!("{asset_id}.webp")
}

/// Error type for thumbnail rendering.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("failed to read image header: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to decode source image: {0}")]
    Decode(image::ImageError),

    #[error("failed to encode thumbnail: {0}")]
    Encode(image::ImageError),
}

/// Render a square WEBP thumbnail from raw source image bytes.
///
/// The source format is sniffed from the bytes (JPEG, PNG, or WEBP). EXIF
/// orientation is applied before cropping, so a photo taken with a rotated
/// camera comes out upright. The output is always
/// `THUMBNAIL_EDGE` x `THUMBNAIL_EDGE` regardless of the source aspect
/// ratio. Rendering the same bytes twice produces identical output.
pub fn render_square_thumbnail(bytes: &[u8]) -> Result<Vec<u8>, ThumbnailError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let mut decoder = reader.into_decoder().map_err(ThumbnailError::Decode)?;

    // Orientation metadata is optional; a source without EXIF decodes as-is.
    let orientation = decoder
        .orientation()
        .unwrap_or(Orientation::NoTransforms);

    let mut img = DynamicImage::from_decoder(decoder).map_err(ThumbnailError::Decode)?;
    img.apply_orientation(orientation);

    encode_webp(&square(img, THUMBNAIL_EDGE))
}

/// Center-crop to a square and resize to `edge` x `edge`.
pub fn square(img: DynamicImage, edge: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let side = w.min(h).max(1);
    let x = (w - side) / 2;
    let y = (h - side) / 2;
    img.crop_imm(x, y, side, side)
        .resize_exact(edge, edge, FilterType::Lanczos3)
}

fn encode_webp(img: &DynamicImage) -> Result<Vec<u8>, ThumbnailError> {
    let rgba = img.to_rgba8();
    let mut out = Vec::new();
    WebPEncoder::new_lossless(&mut out)
        .encode(
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(ThumbnailError::Encode)?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Completion accounting
// ---------------------------------------------------------------------------

/// Percentage of assets that have a thumbnail, rounded to one decimal.
///
/// Returns `0.0` when `total` is zero.
pub fn completion_percentage(with_thumbnails: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let pct = with_thumbnails as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
