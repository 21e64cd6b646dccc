//! Region of interest extraction
//!
//! The ROI is the central window covering a fixed linear fraction of each
//! image dimension. Rows and columns are computed independently; the
//! window starts at `floor((dim - size) / 2)`.

use crate::options::DEFAULT_ROI_FRACTION;
use crate::{CvError, CvResult, ImageInput};
use cvqc_core::{Box, ImageStack, Pix};

/// Geometry of the ROI of one image
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoiDescriptor {
    /// First row of the ROI
    pub start_row: u32,
    /// First column of the ROI
    pub start_col: u32,
    /// Row one past the ROI
    pub end_row: u32,
    /// Column one past the ROI
    pub end_col: u32,
    /// Number of ROI rows
    pub rows: u32,
    /// Number of ROI columns
    pub cols: u32,
    /// Linear fraction of each dimension covered by the ROI
    pub fraction: f64,
}

impl RoiDescriptor {
    /// `(rows, cols)` of the ROI
    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// The ROI as an image rectangle
    pub fn as_box(&self) -> Box {
        Box::new_unchecked(
            self.start_col as i32,
            self.start_row as i32,
            self.cols as i32,
            self.rows as i32,
        )
    }

    /// Nominal size label of the ROI
    ///
    /// The window reaches `fraction / 2` of each dimension on either side
    /// of the center, so the default 0.4 reads "20%".
    pub fn ratio_label(&self) -> String {
        format!("{}%", (self.fraction * 50.0).round())
    }
}

/// ROI crops of a stack with their descriptors
#[derive(Debug, Clone)]
pub struct RoiExtraction {
    /// One descriptor per image, all identical
    pub descriptors: Vec<RoiDescriptor>,
    /// Cropped images, in input order
    pub rois: ImageStack,
}

/// Compute the ROI of a `width` x `height` image
///
/// # Errors
///
/// [`CvError::InvalidOptions`] when `fraction` is outside `(0, 1]`, and
/// [`CvError::Shape`] when the ROI would be empty.
pub fn roi_for_dimensions(width: u32, height: u32, fraction: f64) -> CvResult<RoiDescriptor> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(CvError::InvalidOptions(format!(
            "ROI fraction must be in (0, 1], got {}",
            fraction
        )));
    }
    let rows = (height as f64 * fraction) as u32;
    let cols = (width as f64 * fraction) as u32;
    if rows == 0 || cols == 0 {
        return Err(CvError::Shape(format!(
            "ROI of a {}x{} image at fraction {} is empty",
            width, height, fraction
        )));
    }
    let start_row = (height - rows) / 2;
    let start_col = (width - cols) / 2;
    Ok(RoiDescriptor {
        start_row,
        start_col,
        end_row: start_row + rows,
        end_col: start_col + cols,
        rows,
        cols,
        fraction,
    })
}

fn crop(pix: &Pix, roi: &RoiDescriptor) -> CvResult<Pix> {
    Ok(pix.clip_rectangle(roi.start_col, roi.start_row, roi.cols, roi.rows)?)
}

/// Crop one image to its default ROI
pub fn extract_roi(pix: &Pix) -> CvResult<(RoiDescriptor, Pix)> {
    extract_roi_with_fraction(pix, DEFAULT_ROI_FRACTION)
}

/// Crop one image to the ROI at `fraction`
pub fn extract_roi_with_fraction(pix: &Pix, fraction: f64) -> CvResult<(RoiDescriptor, Pix)> {
    let roi = roi_for_dimensions(pix.width(), pix.height(), fraction)?;
    let cropped = crop(pix, &roi)?;
    Ok((roi, cropped))
}

/// Crop every image of a stack to the default ROI
pub fn extract_roi_stack(stack: &ImageStack) -> CvResult<RoiExtraction> {
    extract_roi_stack_with_fraction(stack, DEFAULT_ROI_FRACTION)
}

/// Crop every image of a stack to the ROI at `fraction`
///
/// The stack guarantees uniform dimensions, so one descriptor is computed
/// and repeated for every image.
pub fn extract_roi_stack_with_fraction(
    stack: &ImageStack,
    fraction: f64,
) -> CvResult<RoiExtraction> {
    let (width, height) = stack.dimensions();
    let roi = roi_for_dimensions(width, height, fraction)?;
    log::debug!(
        "ROI {}x{} at ({}, {}) in {}x{} image(s)",
        roi.cols,
        roi.rows,
        roi.start_col,
        roi.start_row,
        width,
        height
    );

    let crops = stack
        .iter()
        .map(|pix| crop(pix, &roi))
        .collect::<CvResult<Vec<_>>>()?;
    Ok(RoiExtraction {
        descriptors: vec![roi; stack.len()],
        rois: ImageStack::new(crops)?,
    })
}

/// Render ROI descriptors as CSV, one line per image prefixed by its index
pub fn roi_info_csv(descriptors: &[RoiDescriptor]) -> String {
    let mut out =
        String::from(",ROI_nb_pixels,ROI_start_pixel,ROI_end_pixel,ROI_Original_ratio\n");
    for (i, roi) in descriptors.iter().enumerate() {
        out.push_str(&format!(
            "{},\"({}, {})\",\"[{}, {}]\",\"[{}, {}]\",{}\n",
            i,
            roi.rows,
            roi.cols,
            roi.start_row,
            roi.start_col,
            roi.end_row,
            roi.end_col,
            roi.ratio_label()
        ));
    }
    out
}

/// Crop either input variant to the ROI at `fraction`
pub fn extract(input: &ImageInput, fraction: f64) -> CvResult<RoiExtraction> {
    match input {
        ImageInput::Single(pix) => {
            let (roi, cropped) = extract_roi_with_fraction(pix, fraction)?;
            Ok(RoiExtraction {
                descriptors: vec![roi],
                rois: ImageStack::from_single(cropped)?,
            })
        }
        ImageInput::Stack(stack) => extract_roi_stack_with_fraction(stack, fraction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvqc_core::PixelDepth;

    #[test]
    fn test_roi_100() {
        let roi = roi_for_dimensions(100, 100, 0.4).unwrap();
        assert_eq!((roi.start_row, roi.start_col), (30, 30));
        assert_eq!((roi.end_row, roi.end_col), (70, 70));
        assert_eq!(roi.shape(), (40, 40));
        assert_eq!(roi.ratio_label(), "20%");
    }

    #[test]
    fn test_roi_rectangular_and_odd() {
        // 0.4 * 101 = 40.4 -> 40 rows, start floor(61 / 2) = 30
        // 0.4 * 64 = 25.6 -> 25 cols, start floor(39 / 2) = 19
        let roi = roi_for_dimensions(64, 101, 0.4).unwrap();
        assert_eq!(roi.shape(), (40, 25));
        assert_eq!((roi.start_row, roi.start_col), (30, 19));
        assert_eq!(roi.end_row - roi.start_row, roi.rows);
        assert_eq!(roi.end_col - roi.start_col, roi.cols);
        assert_eq!(roi.as_box(), Box::new_unchecked(19, 30, 25, 40));
    }

    #[test]
    fn test_roi_empty() {
        assert!(roi_for_dimensions(2, 100, 0.4).unwrap_err().is_shape_error());
        assert!(matches!(
            roi_for_dimensions(100, 100, 0.0),
            Err(CvError::InvalidOptions(_))
        ));
        assert!(roi_for_dimensions(100, 100, 1.5).is_err());
    }

    #[test]
    fn test_extract_roi_crops_content() {
        let samples: Vec<u32> = (0..100).collect();
        let pix = Pix::from_gray_samples(10, 10, PixelDepth::Bit8, &samples).unwrap();
        let (roi, cropped) = extract_roi(&pix).unwrap();
        assert_eq!((roi.start_row, roi.start_col), (3, 3));
        assert_eq!((cropped.width(), cropped.height()), (4, 4));
        assert_eq!(cropped.get_pixel(0, 0), Some(33));
        assert_eq!(cropped.get_pixel(3, 3), Some(66));
    }

    #[test]
    fn test_roi_info_csv() {
        let roi = roi_for_dimensions(100, 100, 0.4).unwrap();
        let csv = roi_info_csv(&[roi.clone(), roi]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "0,\"(40, 40)\",\"[30, 30]\",\"[70, 70]\",20%");
        assert!(lines[2].starts_with("1,"));
    }

    #[test]
    fn test_extract_single_input() {
        let pix = Pix::new(20, 10, PixelDepth::Bit16).unwrap();
        let extraction = extract(&ImageInput::Single(pix), 0.4).unwrap();
        assert_eq!(extraction.descriptors.len(), 1);
        assert_eq!(extraction.rois.dimensions(), (8, 4));
        assert_eq!(extraction.rois.depth(), PixelDepth::Bit16);
    }
}
