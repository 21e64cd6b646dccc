//! Synthetic grayscale test images
//!
//! All constructors panic on invalid geometry; they exist for tests only.

use cvqc_core::{Pix, PixMut, PixelDepth};

fn blank(width: u32, height: u32, depth: PixelDepth) -> PixMut {
    PixMut::new(width, height, depth)
        .unwrap_or_else(|e| panic!("invalid synthetic image {}x{}: {}", width, height, e))
}

/// An image filled with a single value
///
/// # Panics
///
/// Panics if a dimension is 0.
pub fn uniform_image(width: u32, height: u32, depth: PixelDepth, value: u32) -> Pix {
    let mut pix = blank(width, height, depth);
    pix.set_all(value.min(depth.max_value()));
    pix.into()
}

/// An 8 bpp image of value `background` with a centered `side` x `side`
/// square of value `foreground`
///
/// The square's top-left corner is at `((width - side) / 2, (height - side) / 2)`.
///
/// # Panics
///
/// Panics if a dimension is 0 or the square does not fit.
pub fn square_on_background(
    width: u32,
    height: u32,
    background: u8,
    side: u32,
    foreground: u8,
) -> Pix {
    assert!(
        side <= width && side <= height,
        "square of side {} does not fit in {}x{}",
        side,
        width,
        height
    );
    let mut pix = blank(width, height, PixelDepth::Bit8);
    pix.set_all(background as u32);
    let x0 = (width - side) / 2;
    let y0 = (height - side) / 2;
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            pix.set_pixel_unchecked(x, y, foreground as u32);
        }
    }
    pix.into()
}

/// A 16 bpp diagonal ramp from `low` at (0, 0) to `high` at the
/// bottom-right corner
///
/// The value at (x, y) is `low + (high - low) * (x + y) / (width + height - 2)`,
/// using integer division.
///
/// # Panics
///
/// Panics if a dimension is 0.
pub fn gradient_square(width: u32, height: u32, low: u16, high: u16) -> Pix {
    let mut pix = blank(width, height, PixelDepth::Bit16);
    let span = (width + height).saturating_sub(2).max(1) as u64;
    let (low, high) = (low.min(high) as u64, low.max(high) as u64);
    for y in 0..height {
        for x in 0..width {
            let val = low + (high - low) * (x + y) as u64 / span;
            pix.set_pixel_unchecked(x, y, val as u32);
        }
    }
    pix.into()
}
