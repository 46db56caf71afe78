//! Fixed-point helpers shared by the pixel pipeline.
//!
//! Blend weights and kernel taps are quantized to Q16 (1/65536 steps) so the
//! hot loops stay in integer arithmetic with a single rounding at readback.

/// One full unit in Q16 fixed point.
pub(crate) const Q16_ONE: u32 = 1 << 16;

pub(crate) fn q16_from_f64(w: f64) -> u32 {
    let w = w.clamp(0.0, 1.0);
    (w * f64::from(Q16_ONE)).round() as u32
}

/// Round a Q16 accumulator back to an 8-bit channel.
pub(crate) fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

/// Integer division rounded to nearest.
pub(crate) fn div_round(num: u32, den: u32) -> u32 {
    (num + den / 2) / den
}
