//! CVQC - Coefficient-of-variation quality control for microscopy images
//!
//! Measures how uniform the illumination of a fluorescence acquisition is
//! by comparing the coefficient of variation of the significant pixels in
//! the central region of every image.
//!
//! # Overview
//!
//! - Image I/O (multi-page TIFF stacks, PNG export)
//! - Binary morphology (dilation, erosion, opening, closing)
//! - Otsu thresholding and label coloring
//! - Connected components and border clearing
//! - The CV report itself: ROI, segmentation, statistics, histograms,
//!   annotated images and report sinks
//!
//! # Example
//!
//! ```no_run
//! use cvqc::report::{CvReport, CvReportOptions, DirectorySink, ImageInput, MicroscopyInfo};
//!
//! let stack = cvqc::io::read_image_stack("acquisition.tif").unwrap();
//! let info = MicroscopyInfo::new("Confocal", 460.0, 1.4, "1.0x1.0x1.0", 1.0);
//! let report =
//!     CvReport::generate(&ImageInput::from(stack), info, &CvReportOptions::default()).unwrap();
//! report.persist(&mut DirectorySink::new("cv_report").unwrap()).unwrap();
//! ```

// Re-export core types (primary data structures used everywhere)
pub use cvqc_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use cvqc_color as color;
pub use cvqc_io as io;
pub use cvqc_morph as morph;
pub use cvqc_region as region;
pub use cvqc_report as report;
