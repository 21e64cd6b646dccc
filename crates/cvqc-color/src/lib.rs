//! cvqc-color - Thresholding and coloring
//!
//! - **Thresholding** ([`threshold`]): Otsu's method and fixed-threshold
//!   binarization of 8 and 16 bpp grayscale images
//! - **Coloring** ([`coloring`]): tinting labeled regions of an RGB image
//!   with a cycling palette

pub mod coloring;
mod error;
pub mod threshold;

pub use coloring::{DEFAULT_LABEL_PALETTE, label_color, pix_label_overlay};
pub use error::{ColorError, ColorResult};
pub use threshold::{
    compute_otsu_threshold, otsu_threshold_from_histogram, threshold_otsu, threshold_to_binary,
};
