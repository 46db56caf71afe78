use crate::foundation::core::{Axis, FrameRgb};
use crate::foundation::error::WhipcutResult;

/// Toroidal shift of frame content along one axis.
///
/// Pixels pushed off one edge re-enter from the opposite edge, so the frame
/// is treated as a ring and no content is ever lost. Positive offsets move
/// content toward higher coordinates (right for columns, down for rows);
/// the offset is taken modulo the axis extent, so any magnitude is valid and
/// shifting by the full extent is the identity.
pub fn cyclic_shift(frame: &FrameRgb, offset: i64, axis: Axis) -> WhipcutResult<FrameRgb> {
    let mut out = vec![0u8; frame.data().len()];
    match axis {
        Axis::Horizontal => shift_columns(frame, offset, &mut out),
        Axis::Vertical => shift_rows(frame, offset, &mut out),
    }
    FrameRgb::from_raw(frame.width(), frame.height(), out)
}

fn shift_columns(frame: &FrameRgb, offset: i64, out: &mut [u8]) {
    let w = frame.width() as usize;
    let row_bytes = w * FrameRgb::CHANNELS;
    let shift_bytes = offset.rem_euclid(w as i64) as usize * FrameRgb::CHANNELS;

    let src = frame.data();
    for y in 0..frame.height() as usize {
        let row = &src[y * row_bytes..(y + 1) * row_bytes];
        let out_row = &mut out[y * row_bytes..(y + 1) * row_bytes];
        out_row[shift_bytes..].copy_from_slice(&row[..row_bytes - shift_bytes]);
        out_row[..shift_bytes].copy_from_slice(&row[row_bytes - shift_bytes..]);
    }
}

fn shift_rows(frame: &FrameRgb, offset: i64, out: &mut [u8]) {
    let h = frame.height() as usize;
    let row_bytes = frame.width() as usize * FrameRgb::CHANNELS;
    let shift = offset.rem_euclid(h as i64) as usize;

    let src = frame.data();
    for y in 0..h {
        let src_y = (y + h - shift) % h;
        let row = &src[src_y * row_bytes..(src_y + 1) * row_bytes];
        out[y * row_bytes..(y + 1) * row_bytes].copy_from_slice(row);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shift.rs"]
mod tests;
