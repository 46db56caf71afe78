use super::*;

#[test]
fn cosine_hits_endpoints_and_midpoint() {
    let e = Ease::CosineInOut;
    assert_eq!(e.apply(0.0), 0.0);
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((e.apply(1.0) - 1.0).abs() < 1e-12);
}

#[test]
fn cosine_is_monotonic() {
    let e = Ease::CosineInOut;
    let mut prev = e.apply(0.0);
    for i in 1..=100 {
        let v = e.apply(f64::from(i) / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn linear_is_the_identity_on_the_unit_interval() {
    assert_eq!(Ease::Linear.apply(0.0), 0.0);
    assert_eq!(Ease::Linear.apply(0.3), 0.3);
    assert_eq!(Ease::Linear.apply(1.0), 1.0);
}

#[test]
fn inputs_are_clamped() {
    assert_eq!(Ease::CosineInOut.apply(-0.5), 0.0);
    assert!((Ease::CosineInOut.apply(1.5) - 1.0).abs() < 1e-12);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
    assert_eq!(pulse_intensity(-1.0), 0.0);
    assert_eq!(pulse_intensity(2.0), 0.0);
}

#[test]
fn pulse_peaks_at_half() {
    assert_eq!(pulse_intensity(0.0), 0.0);
    assert_eq!(pulse_intensity(0.5), 1.0);
    assert_eq!(pulse_intensity(1.0), 0.0);
    assert!(pulse_intensity(0.25) < 1.0);
    assert_eq!(pulse_intensity(0.25), pulse_intensity(0.75));
}
