//! Error types for cvqc-report
//!
//! Every lower-level error is folded into one of the report's error kinds
//! so callers only match on [`CvError`].

use cvqc_color::ColorError;
use cvqc_io::IoError;
use cvqc_morph::MorphError;
use cvqc_region::RegionError;
use thiserror::Error;

/// Errors raised while computing or persisting a CV report
#[derive(Debug, Error)]
pub enum CvError {
    /// Stack rank or dimension mismatch, non-grayscale input, empty ROI
    #[error("shape error: {0}")]
    Shape(String),

    /// Thresholding is undefined because the image holds a single value
    #[error("degenerate image{}: every pixel has value {value}", image_suffix(.index))]
    DegenerateImage { index: Option<usize>, value: u32 },

    /// No significant pixels survive segmentation
    #[error("empty segmentation: image {index} has no significant pixels")]
    EmptySegmentation { index: usize },

    /// Invalid option values
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Image source read or report sink write failure
    #[error("I/O error: {0}")]
    Io(IoError),
}

fn image_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" {}", i)).unwrap_or_default()
}

impl CvError {
    /// Attach the stack index to an error raised for a single image
    pub fn at_image(self, index: usize) -> Self {
        match self {
            CvError::DegenerateImage { index: None, value } => CvError::DegenerateImage {
                index: Some(index),
                value,
            },
            other => other,
        }
    }

    /// Whether this error is a shape error
    pub fn is_shape_error(&self) -> bool {
        matches!(self, CvError::Shape(_))
    }
}

impl From<cvqc_core::Error> for CvError {
    fn from(e: cvqc_core::Error) -> Self {
        match e {
            cvqc_core::Error::Io(io) => CvError::Io(IoError::Io(io)),
            cvqc_core::Error::InvalidParameter(msg) => CvError::InvalidOptions(msg),
            other => CvError::Shape(other.to_string()),
        }
    }
}

impl From<IoError> for CvError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Core(core) => core.into(),
            e if e.is_shape_error() => CvError::Shape(e.to_string()),
            e => CvError::Io(e),
        }
    }
}

impl From<std::io::Error> for CvError {
    fn from(e: std::io::Error) -> Self {
        CvError::Io(IoError::Io(e))
    }
}

impl From<MorphError> for CvError {
    fn from(e: MorphError) -> Self {
        match e {
            MorphError::Core(core) => core.into(),
            MorphError::InvalidSel(msg) => CvError::InvalidOptions(msg),
            e @ MorphError::UnsupportedDepth { .. } => CvError::Shape(e.to_string()),
        }
    }
}

impl From<RegionError> for CvError {
    fn from(e: RegionError) -> Self {
        match e {
            RegionError::Core(core) => core.into(),
            RegionError::InvalidParameters(msg) => CvError::InvalidOptions(msg),
            e @ RegionError::UnsupportedDepth { .. } => CvError::Shape(e.to_string()),
        }
    }
}

impl From<ColorError> for CvError {
    fn from(e: ColorError) -> Self {
        match e {
            ColorError::Core(core) => core.into(),
            ColorError::DegenerateHistogram { value } => {
                CvError::DegenerateImage { index: None, value }
            }
            ColorError::InvalidParameters(msg) => CvError::InvalidOptions(msg),
            e @ ColorError::UnsupportedDepth { .. } => CvError::Shape(e.to_string()),
        }
    }
}

/// Result type for report operations
pub type CvResult<T> = Result<T, CvError>;
