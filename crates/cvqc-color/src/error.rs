//! Error types for cvqc-color

use thiserror::Error;

/// Errors that can occur during thresholding and coloring
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] cvqc_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Every pixel holds the same value, so no threshold separates two classes
    #[error("degenerate histogram: all pixels have value {value}")]
    DegenerateHistogram { value: u32 },
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
