//! Pix / ImageStack regression test
//!
//! Tests stack construction from images and raw buffers, ROI-style
//! clipping, masking, histograms and 16 bpp display conversion on
//! synthetic microscopy-like images.

use cvqc_core::{Box, Color, ImageStack, Pix, PixMut, PixelDepth};
use cvqc_test::{RegParams, gradient_square, square_on_background, uniform_image};

#[test]
fn pix_stack_reg() {
    let mut rp = RegParams::new("pix_stack");

    // --- Test 1: uniform stack ---
    let a = square_on_background(100, 100, 10, 30, 200);
    let b = uniform_image(100, 100, PixelDepth::Bit8, 10);
    let stack = ImageStack::new(vec![a.clone(), b]).expect("stack");
    rp.compare_values(2.0, stack.len() as f64, 0.0);
    rp.compare_values(100.0, stack.dimensions().0 as f64, 0.0);
    rp.compare_values(8.0, stack.depth().bits() as f64, 0.0);

    // --- Test 2: non-uniform stack is a shape error ---
    let small = uniform_image(50, 100, PixelDepth::Bit8, 10);
    let err = ImageStack::new(vec![a.clone(), small]).unwrap_err();
    rp.compare_values(1.0, if err.is_shape_error() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 3: raw buffer of rank 3 ---
    let raw: Vec<u32> = a.samples().into_iter().chain(a.samples()).collect();
    let from_raw = ImageStack::from_raw(&[2, 100, 100], &raw, PixelDepth::Bit8).expect("raw");
    rp.compare_pix(&a, from_raw.get(1).expect("second"));

    // --- Test 4: clipping the central square ---
    let crop = a.clip_rectangle(35, 35, 30, 30).expect("clip");
    let hist = crop.gray_histogram().expect("hist");
    rp.compare_values(900.0, hist[200] as f64, 0.0);
    rp.compare_values(200.0, crop.min_max_value().expect("mm").0 as f64, 0.0);

    // --- Test 5: mask application keeps the source intact ---
    let mut mask = PixMut::new(100, 100, PixelDepth::Bit1).expect("mask");
    for y in 0..100 {
        for x in 0..100 {
            if a.get_pixel(x, y).expect("px") > 100 {
                mask.set_pixel(x, y, 1).expect("set");
            }
        }
    }
    let mask: Pix = mask.into();
    rp.compare_values(900.0, mask.count_ones().expect("count") as f64, 0.0);
    let mut zeroed = a.to_mut();
    zeroed.set_unmasked(&mask, 0).expect("unmask");
    let zeroed: Pix = zeroed.into();
    rp.compare_values(900.0, zeroed.count_nonzero() as f64, 0.0);
    rp.compare_values(10.0, a.get_pixel(0, 0).expect("px") as f64, 0.0);

    // --- Test 6: 16 bpp gradient scaled to 8 bpp for display ---
    let grad = gradient_square(64, 64, 1000, 4000);
    let display = grad.convert_to_32().expect("display");
    rp.compare_values(32.0, display.depth().bits() as f64, 0.0);
    let (max_r, _, _) = display.get_rgb(63, 63).expect("rgb");
    rp.compare_values(255.0, max_r as f64, 0.0);

    // --- Test 7: box rendering on the display image ---
    let mut canvas = display.to_mut();
    canvas
        .render_box_color(&Box::new_unchecked(10, 10, 20, 20), 2, Color::RED)
        .expect("render");
    let canvas: Pix = canvas.into();
    rp.compare_values(255.0, canvas.get_rgb(10, 10).expect("rgb").0 as f64, 0.0);
    rp.compare_values(0.0, canvas.get_rgb(10, 10).expect("rgb").1 as f64, 0.0);

    assert!(rp.cleanup(), "pix_stack regression test failed");
}
