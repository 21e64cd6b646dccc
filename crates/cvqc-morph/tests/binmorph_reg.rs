//! Binary morphology regression test
//!
//! Tests dilation, erosion, opening and closing on synthetic masks, and
//! checks the edge behavior of the boundary-safe closing used to clean up
//! segmentation masks.

use cvqc_core::PixelDepth;
use cvqc_morph::{
    BoundaryCondition, Sel, close, close_safe, close_safe_brick, dilate, erode,
    erode_with_boundary, open,
};
use cvqc_test::{RegParams, square_on_background};

#[test]
fn binmorph_reg() {
    let mut rp = RegParams::new("binmorph");

    // 20x20 square centered in a 100x100 frame
    let gray = square_on_background(100, 100, 0, 20, 255);
    let mask = gray.make_nonzero_mask().expect("mask");
    rp.compare_values(1.0, if mask.depth() == PixelDepth::Bit1 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(400.0, mask.count_ones().expect("count") as f64, 0.0);

    let sel = Sel::create_brick(5, 3).expect("sel");

    // --- Test 1: dilation and erosion of a rectangle ---
    let dilated = dilate(&mask, &sel).expect("dilate");
    rp.compare_values((24 * 22) as f64, dilated.count_ones().expect("count") as f64, 0.0);
    let eroded = erode(&mask, &sel).expect("erode");
    rp.compare_values((16 * 18) as f64, eroded.count_ones().expect("count") as f64, 0.0);

    // --- Test 2: opening and closing leave a rectangle unchanged ---
    let opened = open(&mask, &sel).expect("open");
    rp.compare_pix(&mask, &opened);
    let closed = close(&mask, &sel).expect("close");
    rp.compare_pix(&mask, &closed);

    // --- Test 3: closing is extensive, opening anti-extensive ---
    let speckled = {
        let mut m = mask.to_mut();
        m.set_pixel(5, 5, 1).expect("speck");
        m.set_pixel(50, 50, 0).expect("hole");
        cvqc_core::Pix::from(m)
    };
    let closed = close_safe(&speckled, &sel).expect("close_safe");
    rp.compare_values(1.0, closed.get_pixel(50, 50).unwrap_or(0) as f64, 0.0);
    rp.compare_values(1.0, closed.get_pixel(5, 5).unwrap_or(0) as f64, 0.0);
    let opened = open(&speckled, &sel).expect("open");
    rp.compare_values(0.0, opened.get_pixel(5, 5).unwrap_or(1) as f64, 0.0);

    // --- Test 4: edge behavior of closing ---
    let full = {
        let mut m = cvqc_core::PixMut::new(37, 9, PixelDepth::Bit1).expect("full");
        m.set_all(1);
        cvqc_core::Pix::from(m)
    };
    let sel3 = Sel::create_square(3).expect("sel3");
    let plain = close(&full, &sel3).expect("close");
    rp.compare_values((35 * 7) as f64, plain.count_ones().expect("count") as f64, 0.0);
    let safe = close_safe_brick(&full, 3, 3).expect("close_safe_brick");
    rp.compare_pix(&full, &safe);
    let sym = erode_with_boundary(&full, &sel3, BoundaryCondition::Symmetric).expect("erode");
    rp.compare_pix(&full, &sym);

    assert!(rp.cleanup(), "binmorph regression test failed");
}
