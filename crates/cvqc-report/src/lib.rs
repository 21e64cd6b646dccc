//! cvqc-report - Coefficient-of-variation quality-control report
//!
//! Measures illumination/intensity uniformity of fluorescence microscopy
//! acquisitions. For every image of a stack the report:
//!
//! 1. crops the central region of interest ([`roi`])
//! 2. keeps the significant pixels: Otsu threshold, 3x3 closing, removal
//!    of border-touching objects ([`segment`])
//! 3. computes mean, population standard deviation and coefficient of
//!    variation, normalized by the stack minimum ([`stats`])
//! 4. tabulates the intensity histogram of the significant pixels
//!    ([`histogram`], rendered by [`plot`])
//! 5. draws an annotated view of the full image ([`annotate`])
//!
//! [`CvReport`] bundles every artifact; a [`ReportSink`] persists them.
//!
//! # Examples
//!
//! ```
//! use cvqc_core::{PixMut, PixelDepth};
//! use cvqc_report::{CvReport, CvReportOptions, ImageInput, MicroscopyInfo};
//!
//! let mut pix = PixMut::new(100, 100, PixelDepth::Bit8).unwrap();
//! pix.set_all(10);
//! for y in 35..65 {
//!     for x in 35..65 {
//!         pix.set_pixel(x, y, 200).unwrap();
//!     }
//! }
//! let input = ImageInput::from(cvqc_core::Pix::from(pix));
//! let info = MicroscopyInfo::new("confocal", 488.0, 1.4, "0.1x0.1x0.5", 1.0);
//!
//! let report = CvReport::generate(&input, info, &CvReportOptions::default()).unwrap();
//! let record = report.statistics.get(0).unwrap();
//! assert_eq!(record.mean, 200.0);
//! assert_eq!(record.cv, 0.0);
//! ```

pub mod annotate;
mod error;
pub mod histogram;
pub mod metadata;
pub mod options;
pub mod plot;
pub mod report;
pub mod roi;
pub mod segment;
pub mod sink;
pub mod stats;

pub use annotate::{annotate_image, annotate_stack};
pub use error::{CvError, CvResult};
pub use histogram::{HistogramTable, build_histogram, build_histograms};
pub use metadata::MicroscopyInfo;
pub use options::{AnnotateOptions, CvReportOptions, PlotOptions, SegmentOptions};
pub use plot::render_histogram_plot;
pub use report::{CvReport, generate_and_persist};
pub use roi::{RoiDescriptor, RoiExtraction, extract_roi, extract_roi_stack};
pub use segment::{segment_image, segment_stack, significant_mask};
pub use sink::{DirectorySink, MemorySink, ReportSink};
pub use stats::{RawStats, StatisticsRecord, StatisticsTable, compute_statistics};

use cvqc_core::{ImageStack, Pix, PixelDepth};

/// Input of a report: one image or a stack of images
///
/// Each variant has its own entry point; nothing inspects array rank at
/// run time.
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// A single 2D image
    Single(Pix),
    /// An ordered stack of same-sized images
    Stack(ImageStack),
}

impl ImageInput {
    /// Build an input from a raw row-major sample buffer
    ///
    /// `shape` is `[height, width]` for a single image and
    /// `[count, height, width]` for a stack.
    ///
    /// # Errors
    ///
    /// [`CvError::Shape`] for any other rank or a buffer of the wrong size.
    pub fn from_raw(shape: &[usize], samples: &[u32], depth: PixelDepth) -> CvResult<Self> {
        let stack = ImageStack::from_raw(shape, samples, depth)?;
        if shape.len() == 2 {
            let mut images = stack.into_images();
            if let Some(pix) = images.pop() {
                return Ok(ImageInput::Single(pix));
            }
            return Err(CvError::Shape("raw image holds no samples".to_string()));
        }
        Ok(ImageInput::Stack(stack))
    }

    /// Number of images
    pub fn len(&self) -> usize {
        match self {
            ImageInput::Single(_) => 1,
            ImageInput::Stack(stack) => stack.len(),
        }
    }

    /// Always false; inputs hold at least one image
    pub fn is_empty(&self) -> bool {
        false
    }

    /// View the input as a stack
    ///
    /// # Errors
    ///
    /// [`CvError::Shape`] when a single image is not 8 or 16 bpp grayscale.
    pub fn to_stack(&self) -> CvResult<ImageStack> {
        match self {
            ImageInput::Single(pix) => Ok(ImageStack::from_single(pix.clone())?),
            ImageInput::Stack(stack) => Ok(stack.clone()),
        }
    }
}

impl From<Pix> for ImageInput {
    fn from(pix: Pix) -> Self {
        ImageInput::Single(pix)
    }
}

impl From<ImageStack> for ImageInput {
    fn from(stack: ImageStack) -> Self {
        ImageInput::Stack(stack)
    }
}
