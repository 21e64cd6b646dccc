//! Coloring of labeled regions
//!
//! Tints every labeled pixel of an RGB image with a color chosen from a
//! cycling palette, leaving background (label 0) pixels untouched.
//!
//! # Examples
//!
//! ```
//! use cvqc_color::coloring::{DEFAULT_LABEL_PALETTE, pix_label_overlay};
//! use cvqc_core::{Pix, PixelDepth};
//!
//! let base = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
//! let labels = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
//! let tinted = pix_label_overlay(&base, &labels, &DEFAULT_LABEL_PALETTE, 0.3).unwrap();
//! assert_eq!(tinted.depth(), PixelDepth::Bit32);
//! ```

use crate::{ColorError, ColorResult};
use cvqc_core::{Color, Pix, PixelDepth, color};

/// Ten visually distinct colors cycled over labels 1, 2, 3, ...
///
/// red, blue, yellow, magenta, green, indigo, dark orange, cyan, pink,
/// yellow-green
pub const DEFAULT_LABEL_PALETTE: [Color; 10] = [
    Color::new(255, 0, 0),
    Color::new(0, 0, 255),
    Color::new(255, 255, 0),
    Color::new(255, 0, 255),
    Color::new(0, 128, 0),
    Color::new(75, 0, 130),
    Color::new(255, 140, 0),
    Color::new(0, 255, 255),
    Color::new(255, 192, 203),
    Color::new(154, 205, 50),
];

/// Palette color for a label, or `None` for the background label 0
pub fn label_color(label: u32, palette: &[Color]) -> Option<Color> {
    if label == 0 || palette.is_empty() {
        return None;
    }
    Some(palette[(label as usize - 1) % palette.len()])
}

/// Tint labeled regions of an RGB image
///
/// # Arguments
///
/// * `base` - 32 bpp RGB image
/// * `labels` - 32 bpp label image of the same size (0 = background)
/// * `palette` - Colors cycled over labels
/// * `alpha` - Opacity of the tint in `[0.0, 1.0]`
///
/// # Returns
///
/// A new image where each labeled pixel is `alpha * color + (1 - alpha) * base`.
pub fn pix_label_overlay(
    base: &Pix,
    labels: &Pix,
    palette: &[Color],
    alpha: f32,
) -> ColorResult<Pix> {
    if base.depth() != PixelDepth::Bit32 {
        return Err(ColorError::UnsupportedDepth {
            expected: "32 bpp",
            actual: base.depth().bits(),
        });
    }
    if labels.depth() != PixelDepth::Bit32 {
        return Err(ColorError::UnsupportedDepth {
            expected: "32-bit (labeled image)",
            actual: labels.depth().bits(),
        });
    }
    if base.width() != labels.width() || base.height() != labels.height() {
        return Err(cvqc_core::Error::DimensionMismatch {
            expected: (base.width(), base.height()),
            actual: (labels.width(), labels.height()),
        }
        .into());
    }
    if palette.is_empty() {
        return Err(ColorError::InvalidParameters("palette is empty".to_string()));
    }
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ColorError::InvalidParameters(format!(
            "alpha must be in range [0.0, 1.0], got {}",
            alpha
        )));
    }

    let mut out = base.to_mut();
    for y in 0..base.height() {
        for x in 0..base.width() {
            let Some(tint) = label_color(labels.get_pixel_unchecked(x, y), palette) else {
                continue;
            };
            let current = color::extract_rgb(base.get_pixel_unchecked(x, y));
            let (r, g, b) = tint.blend_over(current, alpha);
            out.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvqc_core::PixMut;

    #[test]
    fn test_label_color_cycles() {
        assert_eq!(label_color(0, &DEFAULT_LABEL_PALETTE), None);
        assert_eq!(label_color(1, &DEFAULT_LABEL_PALETTE), Some(Color::RED));
        assert_eq!(label_color(2, &DEFAULT_LABEL_PALETTE), Some(Color::BLUE));
        assert_eq!(label_color(11, &DEFAULT_LABEL_PALETTE), Some(Color::RED));
        assert_eq!(label_color(1, &[]), None);
    }

    #[test]
    fn test_overlay_blends_labeled_pixels_only() {
        let mut base = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        base.set_rgb(0, 0, 100, 100, 100).unwrap();
        base.set_rgb(1, 0, 100, 100, 100).unwrap();
        let base: Pix = base.into();
        let labels = Pix::from_gray_samples(2, 1, PixelDepth::Bit8, &[0, 1]).unwrap();
        // Labels must be 32 bpp
        assert!(pix_label_overlay(&base, &labels, &DEFAULT_LABEL_PALETTE, 0.3).is_err());

        let mut labels = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        labels.set_pixel(1, 0, 1).unwrap();
        let labels: Pix = labels.into();
        let out = pix_label_overlay(&base, &labels, &DEFAULT_LABEL_PALETTE, 0.3).unwrap();
        assert_eq!(out.get_rgb(0, 0), Some((100, 100, 100)));
        // 0.7 * 100 + 0.3 * 255 = 146.5, 0.7 * 100 = 70
        assert_eq!(out.get_rgb(1, 0), Some((147, 70, 70)));
    }

    #[test]
    fn test_overlay_parameter_checks() {
        let base = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        let labels = Pix::new(3, 2, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            pix_label_overlay(&base, &labels, &DEFAULT_LABEL_PALETTE, 0.3),
            Err(ColorError::Core(_))
        ));
        let labels = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(pix_label_overlay(&base, &labels, &[], 0.3).is_err());
        assert!(pix_label_overlay(&base, &labels, &DEFAULT_LABEL_PALETTE, 1.5).is_err());
    }
}
