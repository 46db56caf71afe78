use super::*;

use crate::animation::ease::Ease;
use crate::foundation::error::WhipcutError;

#[test]
fn weight_endpoints_are_exact() {
    let a = FrameRgb::filled(4, 3, [10, 20, 30]).unwrap();
    let b = FrameRgb::filled(4, 3, [200, 210, 220]).unwrap();
    assert_eq!(blend_frames(&a, &b, 0.0).unwrap(), a);
    assert_eq!(blend_frames(&a, &b, 1.0).unwrap(), b);
}

#[test]
fn self_blend_is_identity_at_any_weight() {
    let a = FrameRgb::filled(3, 3, [7, 130, 250]).unwrap();
    for w in [0.0, 0.25, 0.5, 0.9] {
        assert_eq!(blend_frames(&a, &a, w).unwrap(), a);
    }
}

#[test]
fn black_to_white_midpoint_rounds_to_128() {
    let black = FrameRgb::filled(2, 2, [0, 0, 0]).unwrap();
    let white = FrameRgb::filled(2, 2, [255, 255, 255]).unwrap();
    let mid = blend_frames(&black, &white, Ease::CosineInOut.apply(0.5)).unwrap();
    assert_eq!(mid.pixel(0, 0), [128, 128, 128]);
}

#[test]
fn out_of_range_weights_are_clamped() {
    let a = FrameRgb::filled(2, 2, [50, 50, 50]).unwrap();
    let b = FrameRgb::filled(2, 2, [150, 150, 150]).unwrap();
    assert_eq!(blend_frames(&a, &b, -3.0).unwrap(), a);
    assert_eq!(blend_frames(&a, &b, 9.0).unwrap(), b);
}

#[test]
fn dimension_mismatch_is_rejected() {
    let a = FrameRgb::new(4, 3).unwrap();
    let b = FrameRgb::new(3, 4).unwrap();
    assert!(matches!(
        blend_frames(&a, &b, 0.5),
        Err(WhipcutError::DimensionMismatch(_))
    ));
}
