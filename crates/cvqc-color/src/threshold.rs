//! Binary thresholding
//!
//! Provides:
//! - Fixed threshold binarization
//! - Otsu's method (automatic threshold selection)
//!
//! Both work on 8 and 16 bpp grayscale images. The threshold is an
//! intensity value; the foreground is every pixel strictly above it.

use crate::{ColorError, ColorResult};
use cvqc_core::{Pix, PixMut, PixelDepth};

fn check_gray(pix: &Pix) -> ColorResult<()> {
    if !matches!(pix.depth(), PixelDepth::Bit8 | PixelDepth::Bit16) {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 or 16 bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Convert a grayscale image to binary using a fixed threshold
///
/// Pixels > threshold become foreground (1), pixels <= threshold
/// background (0).
pub fn threshold_to_binary(pix: &Pix, threshold: u32) -> ColorResult<Pix> {
    check_gray(pix)?;

    let w = pix.width();
    let h = pix.height();
    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;
    out.copy_resolution_from(pix);
    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x, y) > threshold {
                out.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(out.into())
}

/// Select Otsu's threshold from a histogram
///
/// `histogram[v]` is the number of pixels with value `v`. Only the
/// integer range between the smallest and largest populated values is
/// considered. The returned threshold `t` maximizes the between-class
/// variance of the split `{v <= t}` / `{v > t}`; when several thresholds
/// reach the maximum the lowest one wins.
///
/// Returns `None` when fewer than two distinct values are populated.
pub fn otsu_threshold_from_histogram(histogram: &[u64]) -> Option<u32> {
    let lo = histogram.iter().position(|&c| c > 0)?;
    let hi = histogram.iter().rposition(|&c| c > 0)?;
    if lo == hi {
        return None;
    }
    let bins = &histogram[lo..=hi];

    let total_count: f64 = bins.iter().map(|&c| c as f64).sum();
    let total_sum: f64 = bins
        .iter()
        .enumerate()
        .map(|(i, &c)| c as f64 * (lo + i) as f64)
        .sum();

    let mut best = lo;
    let mut best_var = f64::NEG_INFINITY;
    let mut weight1 = 0.0;
    let mut sum1 = 0.0;

    // Split after bin i: class 1 holds lo..=lo+i, class 2 the rest
    for (i, &count) in bins[..bins.len() - 1].iter().enumerate() {
        let value = (lo + i) as f64;
        weight1 += count as f64;
        sum1 += count as f64 * value;
        let weight2 = total_count - weight1;
        if weight1 == 0.0 || weight2 == 0.0 {
            continue;
        }
        let mean1 = sum1 / weight1;
        let mean2 = (total_sum - sum1) / weight2;
        let var = weight1 * weight2 * (mean1 - mean2) * (mean1 - mean2);
        if var > best_var {
            best_var = var;
            best = lo + i;
        }
    }

    Some(best as u32)
}

/// Compute Otsu's threshold for a grayscale image
///
/// # Errors
///
/// Returns [`ColorError::DegenerateHistogram`] when the image holds a
/// single intensity value.
pub fn compute_otsu_threshold(pix: &Pix) -> ColorResult<u32> {
    check_gray(pix)?;
    let histogram = pix.gray_histogram()?;
    match otsu_threshold_from_histogram(&histogram) {
        Some(t) => {
            log::trace!("otsu threshold {} at {} bpp", t, pix.depth().bits());
            Ok(t)
        }
        None => {
            let (min, _) = pix.min_max_value()?;
            Err(ColorError::DegenerateHistogram { value: min })
        }
    }
}

/// Convert a grayscale image to binary using Otsu's method
///
/// Returns the selected threshold together with the binary image.
pub fn threshold_otsu(pix: &Pix) -> ColorResult<(u32, Pix)> {
    let threshold = compute_otsu_threshold(pix)?;
    let binary = threshold_to_binary(pix, threshold)?;
    Ok((threshold, binary))
}
