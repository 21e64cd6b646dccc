//! Annotated views of the full images
//!
//! The annotated image is the gray image rendered as RGB, with every
//! significant component tinted from a label palette, the ROI outlined in
//! white and large components boxed in red.

use crate::options::{AnnotateOptions, SegmentOptions};
use crate::roi::RoiDescriptor;
use crate::segment::significant_mask;
use crate::{CvError, CvResult};
use cvqc_color::{DEFAULT_LABEL_PALETTE, pix_label_overlay};
use cvqc_core::{Color, ImageStack, Pix, Pta};
use cvqc_region::{component_stats, label_connected_components};

/// Border band used when locating the components to highlight
///
/// Smaller of the distances from the image center to the top and to the
/// left side of the ROI; components reaching this close to any edge are
/// dropped.
fn highlight_buffer(width: u32, height: u32, roi: &RoiDescriptor) -> u32 {
    let rows = (height / 2).saturating_sub(roi.start_row);
    let cols = (width / 2).saturating_sub(roi.start_col);
    rows.min(cols)
}

/// Render the annotated view of one image
///
/// 16 bpp images are stretched to 8 bpp for display; the statistics are
/// never computed from this rendering.
pub fn annotate_image(
    original: &Pix,
    roi: &RoiDescriptor,
    options: &AnnotateOptions,
) -> CvResult<Pix> {
    options.validate()?;

    let segment = SegmentOptions {
        border_buffer: highlight_buffer(original.width(), original.height(), roi),
        ..options.segment.clone()
    };
    let mask = significant_mask(original, &segment)?;
    let labels = label_connected_components(&mask, segment.connectivity)?;
    let components = component_stats(&labels)?;

    let display = original.convert_to_32()?;
    let tinted = pix_label_overlay(
        &display,
        &labels,
        &DEFAULT_LABEL_PALETTE,
        options.overlay_alpha,
    )?;
    let mut out = tinted.to_mut();

    let corners: Pta = [
        (roi.start_col, roi.start_row),
        (roi.end_col, roi.start_row),
        (roi.end_col, roi.end_row),
        (roi.start_col, roi.end_row),
    ]
    .into_iter()
    .map(|(x, y)| (x as f32, y as f32))
    .collect();
    out.render_polyline_color(&corners, options.roi_line_width, Color::WHITE, true)?;

    let mut boxed = 0usize;
    for component in components
        .iter()
        .filter(|c| c.pixel_count >= options.min_region_area)
    {
        out.render_box_color(&component.bounds, options.box_line_width, Color::RED)?;
        boxed += 1;
    }
    log::debug!(
        "annotated {}x{} image: {} component(s), {} boxed, border band {}",
        original.width(),
        original.height(),
        components.len(),
        boxed,
        segment.border_buffer
    );

    Ok(out.into())
}

/// Render the annotated view of every image of a stack
///
/// # Errors
///
/// [`CvError::Shape`] when `rois` does not hold one descriptor per image.
pub fn annotate_stack(
    stack: &ImageStack,
    rois: &[RoiDescriptor],
    options: &AnnotateOptions,
) -> CvResult<Vec<Pix>> {
    if rois.len() != stack.len() {
        return Err(CvError::Shape(format!(
            "{} ROI descriptor(s) for {} image(s)",
            rois.len(),
            stack.len()
        )));
    }
    stack
        .iter()
        .zip(rois)
        .enumerate()
        .map(|(i, (pix, roi))| annotate_image(pix, roi, options).map_err(|e| e.at_image(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::roi_for_dimensions;
    use cvqc_core::{PixMut, PixelDepth};

    fn scene(depth: PixelDepth, bg: u32, fg: u32) -> Pix {
        let mut m = PixMut::new(100, 100, depth).unwrap();
        m.set_all(bg);
        for y in 35..65 {
            for x in 35..65 {
                m.set_pixel(x, y, fg).unwrap();
            }
        }
        m.into()
    }

    #[test]
    fn test_highlight_buffer() {
        let roi = roi_for_dimensions(100, 100, 0.4).unwrap();
        assert_eq!(highlight_buffer(100, 100, &roi), 20);
        let roi = roi_for_dimensions(100, 100, 1.0).unwrap();
        assert_eq!(highlight_buffer(100, 100, &roi), 50);
    }

    #[test]
    fn test_highlight_buffer_non_square() {
        // 200 wide, 100 high: rows give 20, columns 40
        let roi = roi_for_dimensions(200, 100, 0.4).unwrap();
        assert_eq!((roi.start_row, roi.start_col), (30, 60));
        assert_eq!(highlight_buffer(200, 100, &roi), 20);
        // 100 wide, 200 high: rows give 40, columns 20
        let roi = roi_for_dimensions(100, 200, 0.4).unwrap();
        assert_eq!((roi.start_row, roi.start_col), (60, 30));
        assert_eq!(highlight_buffer(100, 200, &roi), 20);
    }

    #[test]
    fn test_annotate_square() {
        let pix = scene(PixelDepth::Bit8, 10, 200);
        let roi = roi_for_dimensions(100, 100, 0.4).unwrap();
        let out = annotate_image(&pix, &roi, &AnnotateOptions::default()).unwrap();

        assert_eq!(out.depth(), PixelDepth::Bit32);
        assert_eq!((out.width(), out.height()), (100, 100));
        // Background untouched
        assert_eq!(out.get_rgb(5, 5), Some((10, 10, 10)));
        // Tinted interior
        assert_eq!(
            out.get_rgb(50, 50),
            Some(Color::RED.blend_over((200, 200, 200), 0.3))
        );
        // ROI outline, then the component box
        assert_eq!(out.get_rgb(30, 30), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(70, 50), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(35, 35), Some((255, 0, 0)));
        assert_eq!(out.get_rgb(64, 64), Some((255, 0, 0)));
    }

    #[test]
    fn test_annotate_small_component_not_boxed() {
        let mut m = PixMut::new(100, 100, PixelDepth::Bit8).unwrap();
        m.set_all(10);
        for y in 45..50 {
            for x in 45..50 {
                m.set_pixel(x, y, 200).unwrap();
            }
        }
        let pix: Pix = m.into();
        let roi = roi_for_dimensions(100, 100, 0.4).unwrap();
        let out = annotate_image(&pix, &roi, &AnnotateOptions::default()).unwrap();
        // 25 px component: tinted, no box
        assert_eq!(
            out.get_rgb(45, 45),
            Some(Color::RED.blend_over((200, 200, 200), 0.3))
        );
        assert_eq!(out.get_rgb(44, 44), Some((10, 10, 10)));
    }

    #[test]
    fn test_annotate_16bpp_scaled_for_display() {
        let pix = scene(PixelDepth::Bit16, 0, 4000);
        let roi = roi_for_dimensions(100, 100, 0.4).unwrap();
        let out = annotate_image(&pix, &roi, &AnnotateOptions::default()).unwrap();
        assert_eq!(out.get_rgb(5, 5), Some((0, 0, 0)));
        assert_eq!(
            out.get_rgb(50, 50),
            Some(Color::RED.blend_over((255, 255, 255), 0.3))
        );
    }

    #[test]
    fn test_annotate_stack_length_mismatch() {
        let pix = scene(PixelDepth::Bit8, 10, 200);
        let stack = ImageStack::new(vec![pix.clone(), pix]).unwrap();
        let roi = roi_for_dimensions(100, 100, 0.4).unwrap();
        let err = annotate_stack(&stack, &[roi.clone()], &AnnotateOptions::default());
        assert!(err.unwrap_err().is_shape_error());
        let out = annotate_stack(&stack, &[roi.clone(), roi], &AnnotateOptions::default());
        assert_eq!(out.unwrap().len(), 2);
    }
}
