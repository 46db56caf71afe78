use crate::foundation::core::FrameRgb;
use crate::foundation::error::WhipcutResult;
use crate::foundation::math::{Q16_ONE, q16_from_f64, q16_to_u8};

/// Weighted per-pixel mix of two equally sized frames.
///
/// `weight` is the share of `b` in the output, clamped to `[0, 1]`. The pair
/// of Q16 weights is complementary by construction, so `weight == 0.0`
/// returns `a` bit-exactly and blending a frame with itself is the identity.
pub fn blend_frames(a: &FrameRgb, b: &FrameRgb, weight: f64) -> WhipcutResult<FrameRgb> {
    a.ensure_same_dims(b, "blend_frames")?;

    let wb = q16_from_f64(weight);
    let wa = Q16_ONE - wb;

    let mut out = vec![0u8; a.data().len()];
    for ((o, pa), pb) in out
        .chunks_exact_mut(FrameRgb::CHANNELS)
        .zip(a.data().chunks_exact(FrameRgb::CHANNELS))
        .zip(b.data().chunks_exact(FrameRgb::CHANNELS))
    {
        for c in 0..FrameRgb::CHANNELS {
            let acc = u64::from(wa) * u64::from(pa[c]) + u64::from(wb) * u64::from(pb[c]);
            o[c] = q16_to_u8(acc);
        }
    }
    FrameRgb::from_raw(a.width(), a.height(), out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
