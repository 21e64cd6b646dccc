//! Histogram and value-range functions for grayscale images

use super::access::get_packed;
use super::Pix;
use crate::error::{Error, Result};

impl Pix {
    /// Get the grayscale histogram of an 8 or 16 bpp image.
    ///
    /// The returned vector has `2^depth` bins; bin `v` holds the number
    /// of pixels with value `v`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 1 and 32 bpp images.
    ///
    /// # Example
    ///
    /// ```
    /// use cvqc_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
    /// let hist = pix.gray_histogram().unwrap();
    /// assert_eq!(hist.len(), 256);
    /// assert_eq!(hist[0], 100);
    /// ```
    pub fn gray_histogram(&self) -> Result<Vec<u64>> {
        let depth = self.depth();
        if !depth.is_gray() {
            return Err(Error::UnsupportedDepth(depth.bits()));
        }

        let mut histogram = vec![0u64; 1usize << depth.bits()];
        for y in 0..self.height() {
            let line = self.row_data(y);
            for x in 0..self.width() {
                histogram[get_packed(line, x, depth) as usize] += 1;
            }
        }
        Ok(histogram)
    }

    /// Get the minimum and maximum pixel values of a grayscale image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 1 and 32 bpp images.
    pub fn min_max_value(&self) -> Result<(u32, u32)> {
        let depth = self.depth();
        if !depth.is_gray() {
            return Err(Error::UnsupportedDepth(depth.bits()));
        }
        let mut min = u32::MAX;
        let mut max = 0u32;
        for y in 0..self.height() {
            let line = self.row_data(y);
            for x in 0..self.width() {
                let v = get_packed(line, x, depth);
                min = min.min(v);
                max = max.max(v);
            }
        }
        Ok((min, max))
    }

    /// Collect the non-zero pixel values in row-major order.
    pub fn nonzero_values(&self) -> Vec<u32> {
        let depth = self.depth();
        let mut out = Vec::new();
        for y in 0..self.height() {
            let line = self.row_data(y);
            for x in 0..self.width() {
                let v = get_packed(line, x, depth);
                if v != 0 {
                    out.push(v);
                }
            }
        }
        out
    }
}
