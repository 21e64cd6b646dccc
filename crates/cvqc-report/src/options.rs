//! Report configuration
//!
//! Every stage takes an options struct whose `Default` reproduces the
//! reference CV report.

use crate::{CvError, CvResult};
use cvqc_region::ConnectivityType;

/// Default linear fraction of each image dimension covered by the ROI
pub const DEFAULT_ROI_FRACTION: f64 = 0.4;

/// Options for segmentation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SegmentOptions {
    /// Side of the square structuring element used to close the mask
    /// (values below 2 skip the closing)
    pub closing_size: u32,
    /// Connectivity used to find border-touching components
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_connectivity"))]
    pub connectivity: ConnectivityType,
    /// Extra band width beyond the outermost pixel ring in which touching
    /// components are removed
    pub border_buffer: u32,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            closing_size: 3,
            connectivity: ConnectivityType::EightWay,
            border_buffer: 0,
        }
    }
}

#[cfg(feature = "serde")]
fn serialize_connectivity<S: serde::Serializer>(
    connectivity: &ConnectivityType,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(match connectivity {
        ConnectivityType::FourWay => 4,
        ConnectivityType::EightWay => 8,
    })
}

/// Options for the annotated images
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnnotateOptions {
    /// Segmentation used to find the highlighted regions; its border
    /// buffer is replaced by the distance from the image center to the ROI
    pub segment: SegmentOptions,
    /// Minimum component area (pixels) that receives a bounding box
    pub min_region_area: u32,
    /// Opacity of the label tint
    pub overlay_alpha: f32,
    /// Width of the ROI outline
    pub roi_line_width: u32,
    /// Width of the component bounding boxes
    pub box_line_width: u32,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            segment: SegmentOptions::default(),
            min_region_area: 100,
            overlay_alpha: 0.3,
            roi_line_width: 1,
            box_line_width: 2,
        }
    }
}

impl AnnotateOptions {
    pub(crate) fn validate(&self) -> CvResult<()> {
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(CvError::InvalidOptions(format!(
                "overlay alpha must be in [0, 1], got {}",
                self.overlay_alpha
            )));
        }
        Ok(())
    }
}

/// Options for the histogram plot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlotOptions {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Space left of the y axis
    pub margin_left: u32,
    /// Space right of the plot area
    pub margin_right: u32,
    /// Space above the plot area
    pub margin_top: u32,
    /// Space below the x axis
    pub margin_bottom: u32,
    /// Width of the histogram lines
    pub line_width: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin_left: 60,
            margin_right: 20,
            margin_top: 20,
            margin_bottom: 40,
            line_width: 1,
        }
    }
}

impl PlotOptions {
    /// Plot area as `(left, top, right, bottom)`, inclusive
    pub(crate) fn plot_area(&self) -> CvResult<(u32, u32, u32, u32)> {
        let horizontal = self.margin_left.saturating_add(self.margin_right);
        let vertical = self.margin_top.saturating_add(self.margin_bottom);
        if self.width < horizontal.saturating_add(2) || self.height < vertical.saturating_add(2) {
            return Err(CvError::InvalidOptions(format!(
                "plot canvas {}x{} leaves no room inside the margins",
                self.width, self.height
            )));
        }
        Ok((
            self.margin_left,
            self.margin_top,
            self.width - self.margin_right - 1,
            self.height - self.margin_bottom - 1,
        ))
    }
}

/// Options for [`CvReport::generate`](crate::CvReport::generate)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CvReportOptions {
    /// Linear fraction of each dimension covered by the ROI
    pub roi_fraction: f64,
    /// Segmentation of the ROI crops
    pub segment: SegmentOptions,
    /// Annotated image rendering
    pub annotate: AnnotateOptions,
    /// Histogram plot rendering
    pub plot: PlotOptions,
}

impl Default for CvReportOptions {
    fn default() -> Self {
        Self {
            roi_fraction: DEFAULT_ROI_FRACTION,
            segment: SegmentOptions::default(),
            annotate: AnnotateOptions::default(),
            plot: PlotOptions::default(),
        }
    }
}
