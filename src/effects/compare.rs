use crate::animation::ease::Ease;
use crate::effects::blend::blend_frames;
use crate::foundation::core::FrameRgb;
use crate::foundation::error::{WhipcutError, WhipcutResult};

/// Place two frames of equal height side by side.
pub fn hstack(left: &FrameRgb, right: &FrameRgb) -> WhipcutResult<FrameRgb> {
    if left.height() != right.height() {
        return Err(WhipcutError::dimension_mismatch(format!(
            "hstack: heights differ, {} vs {}",
            left.height(),
            right.height()
        )));
    }

    let lw = left.width() as usize * FrameRgb::CHANNELS;
    let rw = right.width() as usize * FrameRgb::CHANNELS;
    let mut out = vec![0u8; (lw + rw) * left.height() as usize];
    for (y, row) in out.chunks_exact_mut(lw + rw).enumerate() {
        row[..lw].copy_from_slice(&left.data()[y * lw..(y + 1) * lw]);
        row[lw..].copy_from_slice(&right.data()[y * rw..(y + 1) * rw]);
    }
    FrameRgb::from_raw(left.width() + right.width(), left.height(), out)
}

/// Double-width frame contrasting a linear crossfade (left half) with the
/// cosine-eased crossfade (right half) at the same progress.
pub fn comparison_frame(a: &FrameRgb, b: &FrameRgb, progress: f64) -> WhipcutResult<FrameRgb> {
    let linear = blend_frames(a, b, Ease::Linear.apply(progress))?;
    let eased = blend_frames(a, b, Ease::CosineInOut.apply(progress))?;
    hstack(&linear, &eased)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/compare.rs"]
mod tests;
