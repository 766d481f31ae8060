//! Image normalisation for the analysis endpoint
//!
//! The backend only accepts baseline RGB JPEG. Arbitrary inputs (PNG with
//! alpha, palette GIFs, greyscale, 16-bit TIFF, ...) are decoded, flattened
//! onto an opaque white background when they carry transparency, and
//! re-encoded before being base64-encoded for the JSON payload.

use crate::errors::{ImageError, ImageResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, warn};

/// JPEG quality expected by the backend
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Load the image at `path` and return it as base64 text
///
/// If the file cannot be decoded or re-encoded the raw file bytes are
/// base64-encoded unchanged. Only an unreadable file is an error.
pub fn encode_image(path: &Path, quality: u8) -> ImageResult<String> {
    let bytes = std::fs::read(path).map_err(|source| ImageError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    match normalise_to_jpeg(&bytes, quality) {
        Ok(jpeg) => {
            debug!(
                "Normalised {} ({} bytes) to JPEG ({} bytes)",
                path.display(),
                bytes.len(),
                jpeg.len()
            );
            Ok(STANDARD.encode(jpeg))
        }
        Err(e) => {
            warn!(
                "Error processing image {}: {} - sending original bytes",
                path.display(),
                e
            );
            Ok(STANDARD.encode(&bytes))
        }
    }
}

/// Decode arbitrary image bytes and re-encode them as RGB JPEG
pub fn normalise_to_jpeg(bytes: &[u8], quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = to_opaque_rgb(&decoded);

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100));
    encoder.encode_image(&rgb)?;
    Ok(jpeg)
}

/// Convert to 8-bit RGB, compositing any alpha channel onto white
///
/// Palette images with a transparency entry are expanded to RGBA by the
/// decoder, so `has_alpha` covers them as well.
pub fn to_opaque_rgb(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        out.put_pixel(x, y, Rgb([over_white(r, a), over_white(g, a), over_white(b, a)]));
    }
    out
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let channel = channel as u32;
    let alpha = alpha as u32;
    ((channel * alpha + 255 * (255 - alpha) + 127) / 255) as u8
}
