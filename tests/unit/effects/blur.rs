use super::*;

#[test]
fn kernel_size_is_odd_and_at_least_3() {
    assert_eq!(kernel_size_for_intensity(0.0), 3);
    assert_eq!(kernel_size_for_intensity(0.5), 17);
    assert_eq!(kernel_size_for_intensity(1.0), 31);

    let mut prev = 0u32;
    for i in 0..=20 {
        let k = kernel_size_for_intensity(f64::from(i) / 20.0);
        assert!(k >= 3);
        assert!(!k.is_multiple_of(2));
        assert!(k >= prev);
        prev = k;
    }
}

#[test]
fn gaussian_kernel_taps_sum_to_one() {
    let k = gaussian_taps_q16(15, sigma_for_kernel(15)).unwrap();
    assert_eq!(k.len(), 15);
    assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
    assert!(k[7] >= k[0]);
}

#[test]
fn constant_image_blur_is_identity() {
    let f = FrameRgb::filled(8, 6, [40, 90, 200]).unwrap();
    assert_eq!(gaussian_blur(&f, 0.7).unwrap(), f);
    assert_eq!(motion_blur(&f, 1.0, Axis::Vertical).unwrap(), f);
}

#[test]
fn gaussian_blur_spreads_energy_from_single_pixel() {
    let mut f = FrameRgb::new(9, 9).unwrap();
    f.put_pixel(4, 4, [255, 255, 255]);
    let out = gaussian_blur(&f, 0.1).unwrap();

    let lit = out.data().chunks_exact(3).filter(|px| px[0] != 0).count();
    assert!(lit > 1);

    let sum: u32 = out.data().chunks_exact(3).map(|px| u32::from(px[0])).sum();
    assert!((sum as i32 - 255).abs() <= 8);
}

#[test]
fn motion_blur_streaks_along_the_axis_only() {
    let mut f = FrameRgb::new(7, 5).unwrap();
    f.put_pixel(3, 2, [210, 0, 0]);
    let out = motion_blur(&f, 0.0, Axis::Horizontal).unwrap();

    // k = 3: the impulse spreads to its row neighbors and nowhere else.
    assert_eq!(out.pixel(2, 2)[0], 70);
    assert_eq!(out.pixel(3, 2)[0], 70);
    assert_eq!(out.pixel(4, 2)[0], 70);
    assert_eq!(out.pixel(1, 2)[0], 0);
    assert_eq!(out.pixel(3, 1)[0], 0);
    assert_eq!(out.pixel(3, 3)[0], 0);
}

#[test]
fn zero_intensity_still_blurs() {
    let mut f = FrameRgb::new(6, 1).unwrap();
    f.put_pixel(3, 0, [255, 255, 255]);
    let out = gaussian_blur(&f, 0.0).unwrap();
    assert!(out.pixel(2, 0)[0] > 0);
    assert!(out.pixel(4, 0)[0] > 0);
}
