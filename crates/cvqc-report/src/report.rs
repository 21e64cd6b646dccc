//! Report assembly
//!
//! Computation and persistence are separate steps: a report is always
//! fully computed before anything is written, and a failing sink never
//! discards the computed report.

use crate::annotate::annotate_stack;
use crate::histogram::{HistogramTable, build_histograms};
use crate::metadata::MicroscopyInfo;
use crate::options::CvReportOptions;
use crate::plot::render_histogram_plot;
use crate::roi::{RoiDescriptor, extract};
use crate::segment::segment_stack;
use crate::sink::ReportSink;
use crate::stats::{StatisticsTable, compute_statistics};
use crate::{CvResult, ImageInput};
use cvqc_core::{ImageStack, Pix};

/// Every artifact of a CV report
#[derive(Debug, Clone)]
pub struct CvReport {
    /// ROI geometry, one per image
    pub rois: Vec<RoiDescriptor>,
    /// Annotated full images, one per image
    pub annotated: Vec<Pix>,
    /// Per-image statistics of the segmented ROIs
    pub statistics: StatisticsTable,
    /// Per-image histograms of the segmented ROIs
    pub histograms: Vec<HistogramTable>,
    /// Rendered histogram plot
    pub histogram_plot: Pix,
    /// Acquisition metadata
    pub metadata: MicroscopyInfo,
}

impl CvReport {
    /// Compute the report of an image or a stack
    ///
    /// # Errors
    ///
    /// Any computation error aborts the whole report; no partial report
    /// is returned.
    pub fn generate(
        input: &ImageInput,
        metadata: MicroscopyInfo,
        options: &CvReportOptions,
    ) -> CvResult<Self> {
        let originals: ImageStack = input.to_stack()?;
        let (width, height) = originals.dimensions();
        log::info!(
            "generating CV report for {} image(s) of {}x{} at {} bpp",
            originals.len(),
            width,
            height,
            originals.depth().bits()
        );

        let extraction = extract(input, options.roi_fraction)?;
        let segmented = segment_stack(&extraction.rois, &options.segment)?;
        let statistics = compute_statistics(&segmented)?;
        let histograms = build_histograms(&segmented)?;
        let histogram_plot = render_histogram_plot(&histograms, &options.plot)?;
        let annotated = annotate_stack(&originals, &extraction.descriptors, &options.annotate)?;

        log::info!("CV report ready: {} record(s)", statistics.len());
        Ok(Self {
            rois: extraction.descriptors,
            annotated,
            statistics,
            histograms,
            histogram_plot,
            metadata,
        })
    }

    /// Number of images covered by the report
    pub fn len(&self) -> usize {
        self.rois.len()
    }

    /// Whether the report covers no image
    pub fn is_empty(&self) -> bool {
        self.rois.is_empty()
    }

    /// Hand every artifact to `sink`
    ///
    /// Stops at the first failing write.
    pub fn persist(&self, sink: &mut dyn ReportSink) -> CvResult<()> {
        for (index, image) in self.annotated.iter().enumerate() {
            sink.write_annotated_image(index, image)?;
        }
        sink.write_metadata(&self.metadata)?;
        sink.write_histogram_plot(&self.histogram_plot)?;
        sink.write_histograms(&self.histograms)?;
        sink.write_statistics(&self.statistics)?;
        sink.write_roi_info(&self.rois)?;
        log::info!("CV report persisted: {} annotated image(s)", self.annotated.len());
        Ok(())
    }
}

/// Compute a report and persist it
///
/// The outer error is a computation failure. On success the report is
/// returned together with the outcome of persisting it, so a sink failure
/// never loses the computed report.
pub fn generate_and_persist(
    input: &ImageInput,
    metadata: MicroscopyInfo,
    options: &CvReportOptions,
    sink: &mut dyn ReportSink,
) -> CvResult<(CvReport, CvResult<()>)> {
    let report = CvReport::generate(input, metadata, options)?;
    let persisted = report.persist(sink);
    if let Err(e) = &persisted {
        log::warn!("CV report computed but not persisted: {}", e);
    }
    Ok((report, persisted))
}
