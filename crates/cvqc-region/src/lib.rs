//! cvqc-region - Region processing on binary masks
//!
//! This crate provides:
//!
//! - **Connected component analysis** - labeling 4- or 8-connected regions
//!   and measuring their area and bounding box
//! - **Border clearing** - removing components that touch the image edge
//!   or a band along it
//!
//! # Examples
//!
//! ```
//! use cvqc_core::{Pix, PixMut, PixelDepth};
//! use cvqc_region::{ConnectivityType, find_connected_components};
//!
//! let mut pix_mut = PixMut::new(100, 100, PixelDepth::Bit1).unwrap();
//! pix_mut.set_pixel(10, 10, 1).unwrap();
//! pix_mut.set_pixel(11, 11, 1).unwrap();
//! pix_mut.set_pixel(50, 50, 1).unwrap();
//! let pix: Pix = pix_mut.into();
//!
//! let four = find_connected_components(&pix, ConnectivityType::FourWay).unwrap();
//! assert_eq!(four.len(), 3);
//! let eight = find_connected_components(&pix, ConnectivityType::EightWay).unwrap();
//! assert_eq!(eight.len(), 2);
//! ```

pub mod conncomp;
mod error;
pub mod seedfill;

pub use conncomp::{
    ConnectedComponent, ConnectivityType, component_stats, find_connected_components,
    label_connected_components,
};
pub use error::{RegionError, RegionResult};
pub use seedfill::clear_border;
