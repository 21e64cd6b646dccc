//! Intensity histograms of segmented images
//!
//! Only non-zero pixels are tabulated; zero marks pixels outside the
//! significant region.

use crate::CvResult;
use cvqc_core::{ImageStack, Pix};

/// Ascending unique intensities with their pixel counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HistogramTable {
    /// Distinct non-zero intensities, ascending
    pub intensities: Vec<u32>,
    /// Pixel count of each intensity
    pub counts: Vec<u64>,
    /// Largest value representable at the image depth
    pub max_intensity: u32,
}

impl HistogramTable {
    /// Number of distinct intensities
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    /// Whether no pixel was tabulated
    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    /// Sum of all counts
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest single count, 0 for an empty table
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Iterate over `(intensity, count)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.intensities
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
    }
}

/// Tabulate the non-zero intensities of a grayscale image
pub fn build_histogram(pix: &Pix) -> CvResult<HistogramTable> {
    let full = pix.gray_histogram()?;
    let (intensities, counts) = full
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(_, &count)| count > 0)
        .map(|(value, &count)| (value as u32, count))
        .unzip();
    Ok(HistogramTable {
        intensities,
        counts,
        max_intensity: pix.depth().max_value(),
    })
}

/// One histogram per image, in stack order
pub fn build_histograms(stack: &ImageStack) -> CvResult<Vec<HistogramTable>> {
    stack.iter().map(build_histogram).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvqc_core::PixelDepth;

    #[test]
    fn test_histogram_skips_zero() {
        let pix =
            Pix::from_gray_samples(3, 2, PixelDepth::Bit8, &[0, 7, 3, 7, 0, 255]).unwrap();
        let table = build_histogram(&pix).unwrap();
        assert_eq!(table.intensities, vec![3, 7, 255]);
        assert_eq!(table.counts, vec![1, 2, 1]);
        assert_eq!(table.max_intensity, 255);
        assert_eq!(table.total_count(), pix.count_nonzero());
        assert_eq!(table.max_count(), 2);
        assert_eq!(table.iter().nth(1), Some((7, 2)));
    }

    #[test]
    fn test_histogram_16bpp_and_empty() {
        let pix = Pix::from_gray_samples(2, 1, PixelDepth::Bit16, &[0, 60000]).unwrap();
        let table = build_histogram(&pix).unwrap();
        assert_eq!(table.intensities, vec![60000]);
        assert_eq!(table.max_intensity, 65535);

        let empty = build_histogram(&Pix::new(2, 2, PixelDepth::Bit8).unwrap()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.max_count(), 0);
    }

    #[test]
    fn test_histogram_rejects_rgb() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(build_histogram(&pix).unwrap_err().is_shape_error());
    }
}
