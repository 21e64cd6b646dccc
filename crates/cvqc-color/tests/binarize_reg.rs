//! Binarization regression test
//!
//! Otsu threshold selection on synthetic 8 and 16 bpp images, and label
//! overlay coloring of the resulting mask.

use cvqc_color::{
    ColorError, DEFAULT_LABEL_PALETTE, compute_otsu_threshold, pix_label_overlay, threshold_otsu,
    threshold_to_binary,
};
use cvqc_core::{Pix, PixMut, PixelDepth};
use cvqc_test::{RegParams, gradient_square, square_on_background, uniform_image};

#[test]
fn binarize_reg() {
    let mut rp = RegParams::new("binarize");

    // --- Test 1: square on background selects the background level ---
    let pix = square_on_background(100, 100, 10, 30, 200);
    let (t, mask) = threshold_otsu(&pix).expect("otsu");
    rp.compare_values(10.0, t as f64, 0.0);
    rp.compare_values(900.0, mask.count_ones().expect("count") as f64, 0.0);
    let expected = pix.make_nonzero_mask().expect("mask");
    let shifted = threshold_to_binary(&pix, 10).expect("binary");
    rp.compare_pix(&shifted, &mask);
    rp.compare_values(10000.0, expected.count_ones().expect("count") as f64, 0.0);

    // --- Test 2: 16 bpp ramp splits near the middle ---
    let ramp = gradient_square(64, 64, 1000, 3000);
    let t = compute_otsu_threshold(&ramp).expect("otsu");
    rp.compare_values(2000.0, t as f64, 40.0);
    let mask = threshold_to_binary(&ramp, t).expect("binary");
    let on = mask.count_ones().expect("count") as f64;
    rp.compare_values(2048.0, on, 200.0);

    // --- Test 3: constant image is degenerate ---
    let flat = uniform_image(16, 16, PixelDepth::Bit16, 512);
    let err = compute_otsu_threshold(&flat).unwrap_err();
    rp.compare_values(
        1.0,
        if matches!(err, ColorError::DegenerateHistogram { value: 512 }) { 1.0 } else { 0.0 },
        0.0,
    );

    // --- Test 4: overlay tints labeled pixels ---
    let mut base = PixMut::new(3, 1, PixelDepth::Bit32).expect("base");
    let mut labels = PixMut::new(3, 1, PixelDepth::Bit32).expect("labels");
    for x in 0..3 {
        base.set_rgb(x, 0, 0, 0, 0).expect("rgb");
        labels.set_pixel(x, 0, x).expect("label");
    }
    let base: Pix = base.into();
    let labels: Pix = labels.into();
    let out = pix_label_overlay(&base, &labels, &DEFAULT_LABEL_PALETTE, 1.0).expect("overlay");
    rp.compare_values(0.0, out.get_rgb(0, 0).expect("px").0 as f64, 0.0);
    rp.compare_values(255.0, out.get_rgb(1, 0).expect("px").0 as f64, 0.0);
    rp.compare_values(255.0, out.get_rgb(2, 0).expect("px").2 as f64, 0.0);
    rp.write_pix(&out, cvqc_core::ImageFormat::Png).expect("display");

    assert!(rp.cleanup(), "binarize regression test failed");
}
