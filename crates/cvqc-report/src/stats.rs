//! Per-image intensity statistics and coefficient of variation
//!
//! Statistics are computed in two phases. Every segmented image first
//! yields its raw statistics over its non-zero pixels; only once all of
//! them are known is each CV divided by the stack minimum.

use crate::{CvError, CvResult};
use cvqc_core::{ImageStack, Pix};

/// Raw statistics of the significant pixels of one image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawStats {
    /// Population standard deviation
    pub std: f64,
    /// Mean intensity
    pub mean: f64,
    /// Number of significant pixels
    pub count: u64,
    /// `std / mean`
    pub cv: f64,
}

/// One row of the statistics table
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatisticsRecord {
    /// Population standard deviation
    pub std: f64,
    /// Mean intensity
    pub mean: f64,
    /// Number of significant pixels
    pub pixel_count: u64,
    /// Coefficient of variation
    pub cv: f64,
    /// CV relative to the smallest CV of the stack
    pub normalized_cv: f64,
}

/// Statistics of a stack, one record per image in stack order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatisticsTable {
    records: Vec<StatisticsRecord>,
}

/// CSV header; the leading empty column holds the image index
const CSV_HEADER: &str = ",Standard deviation,Average,Nb pixels,cv,cvs relative to min value";

impl StatisticsTable {
    /// All records
    pub fn records(&self) -> &[StatisticsRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record of image `index`
    pub fn get(&self, index: usize) -> Option<&StatisticsRecord> {
        self.records.get(index)
    }

    /// Iterate over the records
    pub fn iter(&self) -> std::slice::Iter<'_, StatisticsRecord> {
        self.records.iter()
    }

    /// Render the table as CSV, one line per image prefixed by its index
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(CSV_HEADER.len() + 1 + 48 * self.records.len());
        out.push_str(CSV_HEADER);
        out.push('\n');
        for (i, r) in self.records.iter().enumerate() {
            out.push_str(&format!(
                "{},{},{},{},{},{}\n",
                i,
                format_float(r.std),
                format_float(r.mean),
                r.pixel_count,
                format_float(r.cv),
                format_float(r.normalized_cv)
            ));
        }
        out
    }
}

impl<'a> IntoIterator for &'a StatisticsTable {
    type Item = &'a StatisticsRecord;
    type IntoIter = std::slice::Iter<'a, StatisticsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Format a float the way the exported tables expect
///
/// Integral values keep a trailing `.0`, infinities read `inf`.
pub(crate) fn format_float(v: f64) -> String {
    if v == f64::INFINITY {
        return "inf".to_string();
    }
    if v == f64::NEG_INFINITY {
        return "-inf".to_string();
    }
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// Statistics of the non-zero pixels of a segmented image
///
/// Returns `None` when the image has no non-zero pixel.
pub fn image_statistics(pix: &Pix) -> Option<RawStats> {
    let values = pix.nonzero_values();
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let std = variance.sqrt();
    Some(RawStats {
        std,
        mean,
        count: values.len() as u64,
        cv: std / mean,
    })
}

/// Divide every CV by the smallest one
///
/// When the smallest CV is 0, a CV of 0 normalizes to 1 and any positive
/// CV to `+inf`.
pub fn normalize(raw: &[RawStats]) -> StatisticsTable {
    let min_cv = raw.iter().map(|s| s.cv).fold(f64::INFINITY, f64::min);
    let zero_min = min_cv == 0.0;
    if zero_min && raw.iter().any(|s| s.cv > 0.0) {
        log::warn!(
            "smallest CV is 0: {} image(s) with a positive CV normalize to infinity",
            raw.iter().filter(|s| s.cv > 0.0).count()
        );
    }

    let records = raw
        .iter()
        .map(|s| {
            let normalized_cv = if !zero_min {
                s.cv / min_cv
            } else if s.cv == 0.0 {
                1.0
            } else {
                f64::INFINITY
            };
            StatisticsRecord {
                std: s.std,
                mean: s.mean,
                pixel_count: s.count,
                cv: s.cv,
                normalized_cv,
            }
        })
        .collect();
    StatisticsTable { records }
}

/// Compute the statistics table of a stack of segmented images
///
/// # Errors
///
/// [`CvError::EmptySegmentation`] naming the first image without a
/// significant pixel.
pub fn compute_statistics(segmented: &ImageStack) -> CvResult<StatisticsTable> {
    let raw = segmented
        .iter()
        .enumerate()
        .map(|(index, pix)| {
            let stats = image_statistics(pix).ok_or(CvError::EmptySegmentation { index })?;
            log::debug!(
                "image {}: mean {:.3}, std {:.3}, {} pixel(s), cv {:.5}",
                index,
                stats.mean,
                stats.std,
                stats.count,
                stats.cv
            );
            Ok(stats)
        })
        .collect::<CvResult<Vec<_>>>()?;
    Ok(normalize(&raw))
}
