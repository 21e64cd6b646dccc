//! Pixel depth conversion functions
//!
//! Functions for converting grayscale images to display depths:
//! 16 bpp to 8 bpp, and 8 bpp gray to 32 bpp RGB.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Conversion type for 16 bpp to 8 bpp conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convert16To8Type {
    /// Use most significant byte
    MsByte,
    /// Saturate to 255: min(val, 0xFF)
    ClipToFf,
    /// Linear stretch so the image maximum maps to 255
    #[default]
    ScaleToMax,
}

impl Pix {
    /// Convert a 16 bpp image to 8 bpp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 16 bpp.
    pub fn convert_16_to_8(&self, conversion_type: Convert16To8Type) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit16 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let max = match conversion_type {
            Convert16To8Type::ScaleToMax => self.min_max_value()?.1,
            _ => 0,
        };

        let (w, h) = (self.width(), self.height());
        let mut out = PixMut::new(w, h, PixelDepth::Bit8)?;
        out.copy_resolution_from(self);
        for y in 0..h {
            for x in 0..w {
                let val = self.get_pixel_unchecked(x, y);
                let v8 = match conversion_type {
                    Convert16To8Type::MsByte => val >> 8,
                    Convert16To8Type::ClipToFf => val.min(0xff),
                    Convert16To8Type::ScaleToMax if max == 0 => 0,
                    Convert16To8Type::ScaleToMax => {
                        ((u64::from(val) * 255) / u64::from(max)) as u32
                    }
                };
                out.set_pixel_unchecked(x, y, v8);
            }
        }
        Ok(out.into())
    }

    /// Convert a grayscale image to 8 bpp for display.
    ///
    /// 8 bpp images are returned as a shared clone; 16 bpp images are
    /// stretched so their maximum maps to 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 1 and 32 bpp images.
    pub fn convert_to_8(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit8 => Ok(self.clone()),
            PixelDepth::Bit16 => self.convert_16_to_8(Convert16To8Type::ScaleToMax),
            d => Err(Error::UnsupportedDepth(d.bits())),
        }
    }

    /// Convert an 8 bpp gray image to 32 bpp RGB (r = g = b = gray).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 8 bpp.
    pub fn convert_8_to_32(&self) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let (w, h) = (self.width(), self.height());
        let mut out = PixMut::new(w, h, PixelDepth::Bit32)?;
        out.copy_resolution_from(self);
        for y in 0..h {
            for x in 0..w {
                let g = self.get_pixel_unchecked(x, y) as u8;
                out.set_pixel_unchecked(x, y, color::compose_rgb(g, g, g));
            }
        }
        Ok(out.into())
    }

    /// Convert any grayscale image to 32 bpp RGB for display.
    pub fn convert_to_32(&self) -> Result<Pix> {
        self.convert_to_8()?.convert_8_to_32()
    }
}
