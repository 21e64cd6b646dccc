//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word,
//! and in a 16-bit image pixel 0 occupies the upper half-word.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Read the value of pixel `x` from a packed row.
#[inline]
pub(crate) fn get_packed(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit1 => (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1,
        PixelDepth::Bit8 => (line[(x >> 2) as usize] >> (24 - 8 * (x & 3))) & 0xff,
        PixelDepth::Bit16 => (line[(x >> 1) as usize] >> (16 - 16 * (x & 1))) & 0xffff,
        PixelDepth::Bit32 => line[x as usize],
    }
}

/// Write `val` into pixel `x` of a packed row. Excess bits are masked off.
#[inline]
pub(crate) fn set_packed(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit1 => {
            let word = &mut line[(x >> 5) as usize];
            let bit = 1u32 << (31 - (x & 31));
            if val & 1 != 0 {
                *word |= bit;
            } else {
                *word &= !bit;
            }
        }
        PixelDepth::Bit8 => {
            let shift = 24 - 8 * (x & 3);
            let word = &mut line[(x >> 2) as usize];
            *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
        }
        PixelDepth::Bit16 => {
            let shift = 16 - 16 * (x & 1);
            let word = &mut line[(x >> 1) as usize];
            *word = (*word & !(0xffff << shift)) | ((val & 0xffff) << shift);
        }
        PixelDepth::Bit32 => line[x as usize] = val,
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_packed(self.row_data(y), x, self.depth())
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Collect all pixel values in row-major order.
    pub fn samples(&self) -> Vec<u32> {
        let (w, h) = (self.width(), self.height());
        let mut out = Vec::with_capacity(w as usize * h as usize);
        for y in 0..h {
            let line = self.row_data(y);
            for x in 0..w {
                out.push(get_packed(line, x, self.depth()));
            }
        }
        out
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_packed(self.row_data(y), x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        set_packed(self.row_data_mut(y), x, depth, val);
    }

    /// Set RGB values at (x, y) of a 32-bit image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for non 32-bit images and
    /// [`Error::IndexOutOfBounds`] for coordinates outside the image.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Get RGB values at (x, y) of a 32-bit image.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit1_packing() {
        let mut pix = PixMut::new(40, 1, PixelDepth::Bit1).unwrap();
        pix.set_pixel(0, 0, 1).unwrap();
        pix.set_pixel(33, 0, 1).unwrap();
        assert_eq!(pix.data()[0], 0x8000_0000);
        assert_eq!(pix.data()[1], 0x4000_0000);
        assert_eq!(pix.get_pixel(33, 0), Some(1));
        assert_eq!(pix.get_pixel(32, 0), Some(0));
        pix.set_pixel(0, 0, 0).unwrap();
        assert_eq!(pix.data()[0], 0);
    }

    #[test]
    fn test_bit8_packing() {
        let mut pix = PixMut::new(5, 1, PixelDepth::Bit8).unwrap();
        pix.set_pixel(1, 0, 0xab).unwrap();
        assert_eq!(pix.data()[0], 0x00ab_0000);
        pix.set_pixel(4, 0, 0x12).unwrap();
        assert_eq!(pix.data()[1], 0x1200_0000);
        assert_eq!(pix.get_pixel(1, 0), Some(0xab));
    }

    #[test]
    fn test_bit16_packing() {
        let mut pix = PixMut::new(3, 1, PixelDepth::Bit16).unwrap();
        pix.set_pixel(0, 0, 0x1234).unwrap();
        pix.set_pixel(1, 0, 0xffff).unwrap();
        assert_eq!(pix.data()[0], 0x1234_ffff);
        assert_eq!(pix.get_pixel(1, 0), Some(0xffff));
        assert_eq!(pix.get_pixel(2, 0), Some(0));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut pix = PixMut::new(3, 3, PixelDepth::Bit8).unwrap();
        assert!(pix.set_pixel(3, 0, 1).is_err());
        assert!(pix.set_pixel(0, 3, 1).is_err());
        let pix: Pix = pix.into();
        assert_eq!(pix.get_pixel(3, 0), None);
    }

    #[test]
    fn test_rgb_access() {
        let mut pix = PixMut::new(2, 2, PixelDepth::Bit32).unwrap();
        pix.set_rgb(1, 1, 10, 20, 30).unwrap();
        assert_eq!(pix.get_rgb(1, 1), Some((10, 20, 30)));

        let mut gray = PixMut::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(gray.set_rgb(0, 0, 1, 2, 3).is_err());
    }

    #[test]
    fn test_samples_row_major() {
        let pix = Pix::from_gray_samples(2, 2, PixelDepth::Bit16, &[1, 2, 300, 4]).unwrap();
        assert_eq!(pix.samples(), vec![1, 2, 300, 4]);
    }
}
