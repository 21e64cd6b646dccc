//! Mask operations for images
//!
//! Functions for applying 1 bpp masks to images and counting foreground.

use super::access::get_packed;
use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

impl PixMut {
    /// Set pixels to a value where a 1 bpp mask is ON.
    ///
    /// The mask is aligned to the upper-left corner. Only the
    /// overlapping region is processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask is not 1 bpp.
    pub fn set_masked(&mut self, mask: &Pix, val: u32) -> Result<()> {
        self.paint_where(mask, true, val)
    }

    /// Set pixels to a value where a 1 bpp mask is OFF.
    ///
    /// Used to zero everything outside a segmentation mask.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask is not 1 bpp, or if its size differs
    /// from this image.
    pub fn set_unmasked(&mut self, mask: &Pix, val: u32) -> Result<()> {
        if mask.width() != self.width() || mask.height() != self.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (mask.width(), mask.height()),
            });
        }
        self.paint_where(mask, false, val)
    }

    fn paint_where(&mut self, mask: &Pix, on: bool, val: u32) -> Result<()> {
        if mask.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(mask.depth().bits()));
        }
        let w = self.width().min(mask.width());
        let h = self.height().min(mask.height());
        for y in 0..h {
            let mline = mask.row_data(y);
            for x in 0..w {
                if (get_packed(mline, x, PixelDepth::Bit1) == 1) == on {
                    self.set_pixel_unchecked(x, y, val);
                }
            }
        }
        Ok(())
    }
}

impl Pix {
    /// Count the ON pixels of a 1 bpp image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 1 bpp.
    pub fn count_ones(&self) -> Result<u64> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let w = self.width();
        let full_words = (w / 32) as usize;
        let rem = w % 32;
        let mut count = 0u64;
        for y in 0..self.height() {
            let line = self.row_data(y);
            for word in &line[..full_words] {
                count += u64::from(word.count_ones());
            }
            if rem > 0 {
                let mask = !0u32 << (32 - rem);
                count += u64::from((line[full_words] & mask).count_ones());
            }
        }
        Ok(count)
    }

    /// Count the pixels with a non-zero value.
    pub fn count_nonzero(&self) -> u64 {
        let (w, h, d) = (self.width(), self.height(), self.depth());
        let mut count = 0u64;
        for y in 0..h {
            let line = self.row_data(y);
            for x in 0..w {
                if get_packed(line, x, d) != 0 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Create a 1 bpp mask that is ON wherever this image is non-zero.
    pub fn make_nonzero_mask(&self) -> Result<Pix> {
        let (w, h, d) = (self.width(), self.height(), self.depth());
        let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;
        for y in 0..h {
            let line = self.row_data(y);
            for x in 0..w {
                if get_packed(line, x, d) != 0 {
                    out.set_pixel_unchecked(x, y, 1);
                }
            }
        }
        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(w: u32, h: u32, on: &[(u32, u32)]) -> Pix {
        let mut m = PixMut::new(w, h, PixelDepth::Bit1).unwrap();
        for &(x, y) in on {
            m.set_pixel(x, y, 1).unwrap();
        }
        m.into()
    }

    #[test]
    fn test_set_unmasked_zeroes_outside() {
        let pix = Pix::from_gray_samples(2, 2, PixelDepth::Bit8, &[5, 6, 7, 8]).unwrap();
        let mask = mask_from(2, 2, &[(1, 0), (0, 1)]);
        let mut out = pix.to_mut();
        out.set_unmasked(&mask, 0).unwrap();
        let out: Pix = out.into();
        assert_eq!(out.samples(), vec![0, 6, 7, 0]);
        assert_eq!(pix.samples(), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_set_masked() {
        let mut pix = PixMut::new(3, 1, PixelDepth::Bit16).unwrap();
        pix.set_masked(&mask_from(3, 1, &[(2, 0)]), 999).unwrap();
        assert_eq!(pix.get_pixel(2, 0), Some(999));
        assert_eq!(pix.get_pixel(1, 0), Some(0));
    }

    #[test]
    fn test_mask_depth_and_size_checks() {
        let mut pix = PixMut::new(3, 3, PixelDepth::Bit8).unwrap();
        let not_mask = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        assert!(pix.set_masked(&not_mask, 1).is_err());
        assert!(pix.set_unmasked(&mask_from(2, 2, &[]), 0).is_err());
    }

    #[test]
    fn test_count_ones_ignores_padding() {
        let mut m = PixMut::new(33, 2, PixelDepth::Bit1).unwrap();
        for w in m.data_mut() {
            *w = u32::MAX;
        }
        let m: Pix = m.into();
        assert_eq!(m.count_ones().unwrap(), 66);
        assert_eq!(m.count_nonzero(), 66);
    }

    #[test]
    fn test_nonzero_mask() {
        let pix = Pix::from_gray_samples(3, 1, PixelDepth::Bit8, &[0, 4, 0]).unwrap();
        let m = pix.make_nonzero_mask().unwrap();
        assert_eq!(m.samples(), vec![0, 1, 0]);
    }
}
