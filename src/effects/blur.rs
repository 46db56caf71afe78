//! Progressive Gaussian blur and directional motion blur.
//!
//! Kernel width tracks effect intensity: `max(3, trunc(intensity * 30) + 1)`,
//! bumped to the next odd value so every kernel has a center tap. Peak
//! intensity therefore yields a 31-tap kernel; zero intensity still blurs
//! with the 3-tap minimum.

use crate::foundation::core::{Axis, FrameRgb};
use crate::foundation::error::{WhipcutError, WhipcutResult};
use crate::foundation::math::{div_round, q16_to_u8};

/// Odd kernel width for an intensity in `[0, 1]`.
pub fn kernel_size_for_intensity(intensity: f64) -> u32 {
    let scaled = (intensity.clamp(0.0, 1.0) * 30.0) as i64 + 1;
    let mut k = scaled.max(3) as u32;
    if k.is_multiple_of(2) {
        k += 1;
    }
    k
}

/// Gaussian blur whose kernel width follows `intensity`.
///
/// Separable: one weighted pass per axis, Q16 taps, clamp-to-edge sampling.
pub fn gaussian_blur(frame: &FrameRgb, intensity: f64) -> WhipcutResult<FrameRgb> {
    let k = kernel_size_for_intensity(intensity);
    let taps = gaussian_taps_q16(k, sigma_for_kernel(k))?;

    let mut mid = vec![0u8; frame.data().len()];
    let mut out = vec![0u8; frame.data().len()];
    let rows = lane_layout(frame.width(), frame.height(), Axis::Horizontal);
    convolve_lanes(frame.data(), &mut mid, rows, &taps);
    let cols = lane_layout(frame.width(), frame.height(), Axis::Vertical);
    convolve_lanes(&mid, &mut out, cols, &taps);
    FrameRgb::from_raw(frame.width(), frame.height(), out)
}

/// Uniform 1-D mean blur along `axis`, used for whip-pan streaking.
pub fn motion_blur(frame: &FrameRgb, intensity: f64, axis: Axis) -> WhipcutResult<FrameRgb> {
    let k = kernel_size_for_intensity(intensity);
    let mut out = vec![0u8; frame.data().len()];
    let lanes = lane_layout(frame.width(), frame.height(), axis);
    mean_lanes(frame.data(), &mut out, lanes, k);
    FrameRgb::from_raw(frame.width(), frame.height(), out)
}

/// Auto sigma for kernel width `k`, following the OpenCV convention.
fn sigma_for_kernel(k: u32) -> f64 {
    0.3 * ((f64::from(k) - 1.0) * 0.5 - 1.0) + 0.8
}

/// Q16 taps for an odd gaussian kernel of width `k`.
///
/// Off-center taps are rounded individually and the center absorbs the
/// residue, so the taps always sum to exactly 65536.
fn gaussian_taps_q16(k: u32, sigma: f64) -> WhipcutResult<Vec<u32>> {
    if k <= 1 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(WhipcutError::validation("blur sigma must be > 0"));
    }

    let mid = i64::from(k / 2);
    let denom = 2.0 * sigma * sigma;
    let shape: Vec<f64> = (0..i64::from(k))
        .map(|i| {
            let d = (i - mid) as f64;
            (-(d * d) / denom).exp()
        })
        .collect();
    let total: f64 = shape.iter().sum();

    let mut taps: Vec<u32> = shape
        .iter()
        .map(|&s| ((s / total) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let off_center: i64 = taps
        .iter()
        .enumerate()
        .filter(|&(i, _)| i as i64 != mid)
        .map(|(_, &t)| i64::from(t))
        .sum();
    taps[mid as usize] = (65536 - off_center).clamp(0, 65536) as u32;
    Ok(taps)
}

/// How to walk one axis of an RGB frame as independent lanes.
#[derive(Clone, Copy)]
struct LaneLayout {
    /// Samples along the axis.
    len: usize,
    /// Number of lanes crossing it.
    lanes: usize,
    /// Byte stride between neighboring samples.
    step: usize,
    /// Byte stride between lanes.
    lane_step: usize,
}

fn lane_layout(width: u32, height: u32, axis: Axis) -> LaneLayout {
    let (w, h) = (width as usize, height as usize);
    let row = w * FrameRgb::CHANNELS;
    match axis {
        Axis::Horizontal => LaneLayout {
            len: w,
            lanes: h,
            step: FrameRgb::CHANNELS,
            lane_step: row,
        },
        Axis::Vertical => LaneLayout {
            len: h,
            lanes: w,
            step: row,
            lane_step: FrameRgb::CHANNELS,
        },
    }
}

/// One weighted 1-D convolution over every lane, clamping samples to the
/// lane ends.
fn convolve_lanes(src: &[u8], dst: &mut [u8], lay: LaneLayout, taps: &[u32]) {
    let reach = (taps.len() / 2) as i64;
    let last = lay.len as i64 - 1;
    for lane in 0..lay.lanes {
        let base = lane * lay.lane_step;
        for pos in 0..lay.len {
            let mut acc = [0u64; FrameRgb::CHANNELS];
            for (t, &tap) in taps.iter().enumerate() {
                let sample = (pos as i64 + t as i64 - reach).clamp(0, last) as usize;
                let from = base + sample * lay.step;
                for (chan, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(tap) * u64::from(src[from + chan]);
                }
            }
            let to = base + pos * lay.step;
            for (chan, a) in acc.iter().enumerate() {
                dst[to + chan] = q16_to_u8(*a);
            }
        }
    }
}

/// Unweighted 1-D mean of `k` samples over every lane, rounding half up.
fn mean_lanes(src: &[u8], dst: &mut [u8], lay: LaneLayout, k: u32) {
    let reach = i64::from(k / 2);
    let last = lay.len as i64 - 1;
    for lane in 0..lay.lanes {
        let base = lane * lay.lane_step;
        for pos in 0..lay.len {
            let mut acc = [0u32; FrameRgb::CHANNELS];
            for off in -reach..=reach {
                let sample = (pos as i64 + off).clamp(0, last) as usize;
                let from = base + sample * lay.step;
                for (chan, a) in acc.iter_mut().enumerate() {
                    *a += u32::from(src[from + chan]);
                }
            }
            let to = base + pos * lay.step;
            for (chan, a) in acc.iter().enumerate() {
                dst[to + chan] = div_round(*a, k) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
