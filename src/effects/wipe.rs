use crate::foundation::core::{Axis, FrameRgb};
use crate::foundation::error::WhipcutResult;
use crate::foundation::math::{Q16_ONE, q16_from_f64, q16_to_u8};
use crate::transition::kind::Direction;

/// Directional reveal of the incoming frame.
///
/// The incoming frame covers a growing band of the outgoing frame, entering
/// from the edge named by `direction`. `fraction` is the already-eased share
/// of travel, clamped to `[0, 1]`.
///
/// With `soft_edge == 0` the front is hard: the band width in pixels is
/// truncated, so very small fractions leave the outgoing frame untouched. A
/// positive `soft_edge` widens the front into a smoothstep ramp spanning that
/// share of the axis on each side; travel is stretched by the ramp width so
/// coverage still reaches exactly 0 and 1 at the endpoints.
pub fn wipe_frames(
    a: &FrameRgb,
    b: &FrameRgb,
    direction: Direction,
    fraction: f64,
    soft_edge: f64,
) -> WhipcutResult<FrameRgb> {
    a.ensure_same_dims(b, "wipe_frames")?;

    let fraction = fraction.clamp(0.0, 1.0);
    let soft_edge = soft_edge.max(0.0);
    let extent = match direction.axis() {
        Axis::Horizontal => a.width() as usize,
        Axis::Vertical => a.height() as usize,
    };

    if soft_edge <= 0.0 {
        return hard_wipe(a, b, direction, (extent as f64 * fraction) as usize);
    }

    // Incoming coverage per distance from the entry edge.
    let soft_px = soft_edge * extent as f64;
    let edge = fraction * (extent as f64 + 2.0 * soft_px) - soft_px;
    let weights: Vec<u32> = (0..extent)
        .map(|pos| q16_from_f64(1.0 - smoothstep(edge - soft_px, edge + soft_px, pos as f64)))
        .collect();

    // sign > 0 means the incoming frame enters from the far edge of the axis.
    let far = direction.sign() > 0;
    let w = a.width() as usize;
    let row_bytes = w * FrameRgb::CHANNELS;
    let mut out = a.clone();
    match direction.axis() {
        Axis::Horizontal => {
            for (out_row, b_row) in out
                .data_mut()
                .chunks_exact_mut(row_bytes)
                .zip(b.data().chunks_exact(row_bytes))
            {
                for x in 0..w {
                    let pos = if far { w - 1 - x } else { x };
                    let span = x * FrameRgb::CHANNELS..(x + 1) * FrameRgb::CHANNELS;
                    mix_px(&mut out_row[span.clone()], &b_row[span], weights[pos]);
                }
            }
        }
        Axis::Vertical => {
            let h = a.height() as usize;
            for (y, (out_row, b_row)) in out
                .data_mut()
                .chunks_exact_mut(row_bytes)
                .zip(b.data().chunks_exact(row_bytes))
                .enumerate()
            {
                let pos = if far { h - 1 - y } else { y };
                let wb = weights[pos];
                for (o, s) in out_row
                    .chunks_exact_mut(FrameRgb::CHANNELS)
                    .zip(b_row.chunks_exact(FrameRgb::CHANNELS))
                {
                    mix_px(o, s, wb);
                }
            }
        }
    }
    Ok(out)
}

fn hard_wipe(
    a: &FrameRgb,
    b: &FrameRgb,
    direction: Direction,
    band: usize,
) -> WhipcutResult<FrameRgb> {
    let mut out = a.clone();
    if band == 0 {
        return Ok(out);
    }

    let w = a.width() as usize;
    let h = a.height() as usize;
    let row_bytes = w * FrameRgb::CHANNELS;
    let src = b.data();
    let dst = out.data_mut();
    match direction {
        Direction::Left => {
            let bytes = band * FrameRgb::CHANNELS;
            for y in 0..h {
                let start = y * row_bytes;
                dst[start..start + bytes].copy_from_slice(&src[start..start + bytes]);
            }
        }
        Direction::Right => {
            let bytes = band * FrameRgb::CHANNELS;
            for y in 0..h {
                let end = (y + 1) * row_bytes;
                dst[end - bytes..end].copy_from_slice(&src[end - bytes..end]);
            }
        }
        Direction::Up => {
            let bytes = band * row_bytes;
            dst[..bytes].copy_from_slice(&src[..bytes]);
        }
        Direction::Down => {
            let total = h * row_bytes;
            let bytes = band * row_bytes;
            dst[total - bytes..].copy_from_slice(&src[total - bytes..]);
        }
    }
    Ok(out)
}

fn mix_px(out: &mut [u8], incoming: &[u8], wb: u32) {
    if wb == 0 {
        return;
    }
    if wb == Q16_ONE {
        out.copy_from_slice(incoming);
        return;
    }
    let wa = Q16_ONE - wb;
    for c in 0..FrameRgb::CHANNELS {
        let acc = u64::from(wa) * u64::from(out[c]) + u64::from(wb) * u64::from(incoming[c]);
        out[c] = q16_to_u8(acc);
    }
}

fn smoothstep(a: f64, b: f64, x: f64) -> f64 {
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    let t = (x - a) / (b - a);
    (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/wipe.rs"]
mod tests;
