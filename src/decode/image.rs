use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, FrameRgb};
use crate::foundation::error::{WhipcutError, WhipcutResult};

/// Decode encoded image bytes into a packed RGB frame.
pub fn decode_image_rgb(bytes: &[u8]) -> WhipcutResult<FrameRgb> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgb = dyn_img.to_rgb8();
    let (width, height) = rgb.dimensions();
    FrameRgb::from_raw(width, height, rgb.into_raw())
}

/// Read and decode an image file into a packed RGB frame.
pub fn load_image_rgb(path: impl AsRef<Path>) -> WhipcutResult<FrameRgb> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image '{}'", path.display()))?;
    decode_image_rgb(&bytes)
}

/// Scale a frame to the target canvas with bilinear filtering.
///
/// Frames already at the target size pass through as a clone.
pub fn scale_to_canvas(frame: &FrameRgb, canvas: Canvas) -> WhipcutResult<FrameRgb> {
    if frame.canvas() == canvas {
        return Ok(frame.clone());
    }
    let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or_else(|| {
            WhipcutError::dimension_mismatch("frame buffer does not match its dimensions")
        })?;
    let scaled = image::imageops::resize(
        &img,
        canvas.width,
        canvas.height,
        image::imageops::FilterType::Triangle,
    );
    FrameRgb::from_raw(canvas.width, canvas.height, scaled.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/decode/image.rs"]
mod tests;
