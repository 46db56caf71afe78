use super::*;

use crate::foundation::error::WhipcutError;

fn two_tone(w: u32, h: u32) -> (FrameRgb, FrameRgb) {
    (
        FrameRgb::filled(w, h, [200, 40, 40]).unwrap(),
        FrameRgb::filled(w, h, [40, 40, 200]).unwrap(),
    )
}

#[test]
fn endpoints_match_the_inputs() {
    let (a, b) = two_tone(6, 4);
    let dirs = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
    for dir in dirs {
        assert_eq!(wipe_frames(&a, &b, dir, 0.0, 0.0).unwrap(), a);
        assert_eq!(wipe_frames(&a, &b, dir, 1.0, 0.0).unwrap(), b);
        assert_eq!(wipe_frames(&a, &b, dir, 0.0, 0.2).unwrap(), a);
        assert_eq!(wipe_frames(&a, &b, dir, 1.0, 0.2).unwrap(), b);
    }
}

#[test]
fn left_wipe_covers_leading_columns() {
    let (a, b) = two_tone(8, 3);
    let out = wipe_frames(&a, &b, Direction::Left, 0.5, 0.0).unwrap();
    assert_eq!(out.pixel(3, 1), b.pixel(3, 1));
    assert_eq!(out.pixel(4, 1), a.pixel(4, 1));
}

#[test]
fn down_wipe_covers_trailing_rows() {
    let (a, b) = two_tone(4, 6);
    let out = wipe_frames(&a, &b, Direction::Down, 0.5, 0.0).unwrap();
    assert_eq!(out.pixel(2, 2), a.pixel(2, 2));
    assert_eq!(out.pixel(2, 3), b.pixel(2, 3));
}

#[test]
fn tiny_fractions_truncate_to_no_band() {
    let (a, b) = two_tone(5, 5);
    let out = wipe_frames(&a, &b, Direction::Right, 0.1, 0.0).unwrap();
    assert_eq!(out, a);
}

#[test]
fn soft_edge_ramps_across_the_front() {
    let (a, b) = two_tone(8, 2);
    let out = wipe_frames(&a, &b, Direction::Left, 0.5, 0.25).unwrap();

    // Smoothstep band spans positions 2..6 around the front at 4.
    let reds: Vec<u8> = (0..8).map(|x| out.pixel(x, 0)[0]).collect();
    assert_eq!(reds, vec![40, 40, 40, 65, 120, 175, 200, 200]);
}

#[test]
fn negative_soft_edge_behaves_like_a_hard_front() {
    let (a, b) = two_tone(8, 2);
    let hard = wipe_frames(&a, &b, Direction::Up, 0.5, 0.0).unwrap();
    let clamped = wipe_frames(&a, &b, Direction::Up, 0.5, -2.0).unwrap();
    assert_eq!(hard, clamped);
}

#[test]
fn mismatched_frames_are_rejected() {
    let a = FrameRgb::new(4, 4).unwrap();
    let b = FrameRgb::new(5, 4).unwrap();
    assert!(matches!(
        wipe_frames(&a, &b, Direction::Up, 0.5, 0.0),
        Err(WhipcutError::DimensionMismatch(_))
    ));
}
