//! Image stack I/O regression test
//!
//! Writes synthetic acquisitions as multipage TIFF and PNG into a
//! temporary directory, reads them back as stacks and checks that the
//! pixel data and the error classes survive the trip.

use cvqc_core::{ImageStack, Pix, PixMut, PixelDepth};
use cvqc_io::{ImageFormat, IoError, read_image, read_image_stack, write_image, write_image_stack};
use cvqc_test::{RegParams, gradient_square, square_on_background};

#[test]
fn stackio_reg() {
    let mut rp = RegParams::new("stackio");
    let dir = tempfile::tempdir().expect("tempdir");

    // --- Test 1: 16 bpp multipage TIFF round trip ---
    let a = gradient_square(64, 48, 100, 4000);
    let b = gradient_square(64, 48, 500, 9000);
    let stack = ImageStack::new(vec![a.clone(), b.clone()]).expect("stack");
    let tif = dir.path().join("acq.tif");
    write_image_stack(&stack, &tif).expect("write stack");
    let back = read_image_stack(&tif).expect("read stack");
    rp.compare_values(2.0, back.len() as f64, 0.0);
    rp.compare_values(16.0, back.depth().bits() as f64, 0.0);
    rp.compare_pix(&a, back.get(0).expect("page 0"));
    rp.compare_pix(&b, back.get(1).expect("page 1"));

    // --- Test 2: single 8 bpp PNG reads as a stack of one ---
    let sq = square_on_background(100, 100, 10, 30, 200);
    let png = dir.path().join("single.png");
    write_image(&sq, &png, ImageFormat::Png).expect("write png");
    let single = read_image_stack(&png).expect("read png stack");
    rp.compare_values(1.0, single.len() as f64, 0.0);
    rp.compare_pix(&sq, single.get(0).expect("image"));

    // --- Test 3: RGB rasters are exported but rejected as input ---
    let mut rgb = PixMut::new(8, 8, PixelDepth::Bit32).expect("rgb");
    rgb.set_rgb(3, 3, 255, 0, 0).expect("set");
    let rgb: Pix = rgb.into();
    let rgb_path = dir.path().join("overlay.png");
    write_image(&rgb, &rgb_path, ImageFormat::Png).expect("write rgb");
    let reread = read_image(&rgb_path).expect("read rgb");
    rp.compare_values(255.0, reread.get_rgb(3, 3).expect("px").0 as f64, 0.0);
    let err = read_image_stack(&rgb_path).unwrap_err();
    rp.compare_values(1.0, if err.is_shape_error() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 4: missing file is an I/O error, not a shape error ---
    let err = read_image_stack(dir.path().join("missing.tif")).unwrap_err();
    rp.compare_values(1.0, if matches!(err, IoError::Io(_)) { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, if err.is_shape_error() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 5: unknown content ---
    let junk = dir.path().join("junk.bin");
    std::fs::write(&junk, b"not an image").expect("write junk");
    let err = read_image(&junk).unwrap_err();
    rp.compare_values(
        1.0,
        if matches!(err, IoError::UnsupportedFormat(_)) { 1.0 } else { 0.0 },
        0.0,
    );

    assert!(rp.cleanup(), "stackio regression test failed");
}
