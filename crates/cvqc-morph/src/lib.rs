//! cvqc-morph - Binary morphology
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Binary morphology on 1 bpp masks: dilation, erosion, opening, closing
//! - Boundary-safe closing, which neither erodes objects touching the
//!   image edge nor grows anything from outside the image

pub mod binary;
mod error;
pub mod sel;

pub use binary::{
    BoundaryCondition, close, close_safe, close_safe_brick, dilate, erode, erode_with_boundary,
    open,
};
pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};
