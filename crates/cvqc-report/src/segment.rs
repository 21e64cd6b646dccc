//! Segmentation of significant-intensity pixels
//!
//! Pipeline: Otsu threshold, strict binarization, 3x3 closing that treats
//! the outside of the image as neutral, removal of border-touching
//! components. The segmented image keeps the source intensity inside the
//! mask and is 0 elsewhere.

use crate::options::SegmentOptions;
use crate::{CvError, CvResult};
use cvqc_color::{compute_otsu_threshold, threshold_to_binary};
use cvqc_core::{ImageStack, Pix};
use cvqc_morph::close_safe_brick;
use cvqc_region::clear_border;

/// Compute the 1 bpp mask of significant pixels of a grayscale image
///
/// # Errors
///
/// [`CvError::DegenerateImage`] when the image holds a single value, and
/// [`CvError::Shape`] for non-grayscale input.
pub fn significant_mask(pix: &Pix, options: &SegmentOptions) -> CvResult<Pix> {
    let threshold = compute_otsu_threshold(pix)?;
    let binary = threshold_to_binary(pix, threshold)?;
    let closed = if options.closing_size >= 2 {
        close_safe_brick(&binary, options.closing_size, options.closing_size)?
    } else {
        binary
    };
    let mask = clear_border(&closed, options.border_buffer, options.connectivity)?;
    log::debug!(
        "otsu threshold {} on {}x{} image: {} significant pixel(s)",
        threshold,
        pix.width(),
        pix.height(),
        mask.count_ones()?
    );
    Ok(mask)
}

/// Zero every pixel outside the significant mask
///
/// Returns a new image; `pix` is not modified.
pub fn segment_image(pix: &Pix, options: &SegmentOptions) -> CvResult<Pix> {
    let mask = significant_mask(pix, options)?;
    let mut segmented = pix.to_mut();
    segmented.set_unmasked(&mask, 0)?;
    Ok(segmented.into())
}

/// Segment every image of a stack
///
/// Fails on the first degenerate image, naming its index.
pub fn segment_stack(stack: &ImageStack, options: &SegmentOptions) -> CvResult<ImageStack> {
    let segmented = stack
        .iter()
        .enumerate()
        .map(|(i, pix)| segment_image(pix, options).map_err(|e| e.at_image(i)))
        .collect::<CvResult<Vec<_>>>()?;
    Ok(ImageStack::new(segmented)?)
}

/// Whether an error means the image could not be thresholded
pub fn is_degenerate(err: &CvError) -> bool {
    matches!(err, CvError::DegenerateImage { .. })
}
