//! ImageStack - An ordered set of same-sized grayscale images
//!
//! A stack holds the images of a single acquisition. The position of an
//! image in the stack is its identity: statistics, histograms and exported
//! artifacts are all keyed by that index.

use crate::error::{Error, Result};
use crate::pix::{Pix, PixelDepth};

/// Ordered, non-empty sequence of 8 or 16 bpp images with identical
/// width, height and depth.
#[derive(Debug, Clone)]
pub struct ImageStack {
    images: Vec<Pix>,
}

impl ImageStack {
    /// Build a stack from a list of images.
    ///
    /// # Errors
    ///
    /// - [`Error::NullInput`] if `images` is empty
    /// - [`Error::UnsupportedDepth`] if an image is not 8 or 16 bpp
    /// - [`Error::DimensionMismatch`] / [`Error::IncompatibleDepths`] if the
    ///   images are not uniform
    pub fn new(images: Vec<Pix>) -> Result<Self> {
        let first = images.first().ok_or(Error::NullInput("image stack"))?;
        if !first.depth().is_gray() {
            return Err(Error::UnsupportedDepth(first.depth().bits()));
        }
        for pix in &images[1..] {
            if pix.width() != first.width() || pix.height() != first.height() {
                return Err(Error::DimensionMismatch {
                    expected: (first.width(), first.height()),
                    actual: (pix.width(), pix.height()),
                });
            }
            if pix.depth() != first.depth() {
                return Err(Error::IncompatibleDepths(
                    first.depth().bits(),
                    pix.depth().bits(),
                ));
            }
        }
        Ok(Self { images })
    }

    /// Build a stack holding a single image.
    pub fn from_single(pix: Pix) -> Result<Self> {
        Self::new(vec![pix])
    }

    /// Build a stack from a raw row-major sample buffer.
    ///
    /// `shape` is `[height, width]` for a single image or
    /// `[count, height, width]` for a stack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] when the rank is not 2 or 3, when a
    /// dimension is zero or when `samples` does not hold exactly the number
    /// of elements `shape` describes.
    pub fn from_raw(shape: &[usize], samples: &[u32], depth: PixelDepth) -> Result<Self> {
        let (count, height, width) = match *shape {
            [h, w] => (1, h, w),
            [n, h, w] => (n, h, w),
            _ => {
                return Err(Error::InvalidShape {
                    shape: shape.to_vec(),
                    reason: format!("expected rank 2 or 3, got rank {}", shape.len()),
                });
            }
        };
        if count == 0 || height == 0 || width == 0 {
            return Err(Error::InvalidShape {
                shape: shape.to_vec(),
                reason: "zero-sized dimension".to_string(),
            });
        }
        let (plane, total) = match height
            .checked_mul(width)
            .and_then(|plane| Some((plane, plane.checked_mul(count)?)))
        {
            Some(sizes) => sizes,
            None => {
                return Err(Error::InvalidShape {
                    shape: shape.to_vec(),
                    reason: "shape overflows usize".to_string(),
                });
            }
        };
        if samples.len() != total {
            return Err(Error::InvalidShape {
                shape: shape.to_vec(),
                reason: format!("expected {} samples, got {}", total, samples.len()),
            });
        }
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(Error::InvalidShape {
                    shape: shape.to_vec(),
                    reason: "dimension exceeds u32".to_string(),
                });
            }
        };

        let images = samples
            .chunks_exact(plane)
            .map(|chunk| Pix::from_gray_samples(w, h, depth, chunk))
            .collect::<Result<Vec<_>>>()?;
        Self::new(images)
    }

    /// Number of images in the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// A stack is never empty; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Get an image by index.
    pub fn get(&self, index: usize) -> Option<&Pix> {
        self.images.get(index)
    }

    /// Iterate over the images in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pix> {
        self.images.iter()
    }

    /// Width and height shared by every image.
    pub fn dimensions(&self) -> (u32, u32) {
        let first = &self.images[0];
        (first.width(), first.height())
    }

    /// Depth shared by every image.
    pub fn depth(&self) -> PixelDepth {
        self.images[0].depth()
    }

    /// Borrow all images as a slice.
    pub fn images(&self) -> &[Pix] {
        &self.images
    }

    /// Consume the stack and return its images.
    pub fn into_images(self) -> Vec<Pix> {
        self.images
    }
}

impl<'a> IntoIterator for &'a ImageStack {
    type Item = &'a Pix;
    type IntoIter = std::slice::Iter<'a, Pix>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
