//! Report persistence
//!
//! A [`ReportSink`] receives every artifact of a report. Write failures
//! surface as [`CvError::Io`] and are not retried.

use crate::histogram::HistogramTable;
use crate::metadata::MicroscopyInfo;
use crate::roi::{RoiDescriptor, roi_info_csv};
use crate::stats::StatisticsTable;
use crate::{CvError, CvResult};
use cvqc_core::{ImageFormat, Pix};
use cvqc_io::IoError;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for the artifacts of a report
pub trait ReportSink {
    /// Store the annotated view of image `index`
    fn write_annotated_image(&mut self, index: usize, image: &Pix) -> CvResult<()>;

    /// Store the statistics table
    fn write_statistics(&mut self, table: &StatisticsTable) -> CvResult<()>;

    /// Store the acquisition metadata
    fn write_metadata(&mut self, info: &MicroscopyInfo) -> CvResult<()>;

    /// Store the rendered histogram plot
    fn write_histogram_plot(&mut self, plot: &Pix) -> CvResult<()>;

    /// Store the ROI geometry of every image
    fn write_roi_info(&mut self, rois: &[RoiDescriptor]) -> CvResult<()>;

    /// Store the raw histogram tables
    ///
    /// Sinks that only keep rendered artifacts ignore them.
    fn write_histograms(&mut self, _tables: &[HistogramTable]) -> CvResult<()> {
        Ok(())
    }
}

/// Writes the report as files in one directory
///
/// | artifact | file |
/// |----------|------|
/// | annotated image `i` | `<i>.roi.png` |
/// | statistics | `cv.csv` |
/// | metadata | `microscopy_info.csv` |
/// | ROI geometry | `roi_info.csv` |
/// | histogram plot | `hist.png` |
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `dir`, creating it if missing
    pub fn new<P: AsRef<Path>>(dir: P) -> CvResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(io_error)?;
        Ok(Self { dir })
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_text(&self, name: &str, contents: &str) -> CvResult<()> {
        let path = self.dir.join(name);
        log::debug!("writing {}", path.display());
        fs::write(&path, contents).map_err(io_error)
    }

    fn write_png(&self, name: &str, pix: &Pix) -> CvResult<()> {
        let path = self.dir.join(name);
        log::debug!("writing {}", path.display());
        cvqc_io::write_image(pix, &path, ImageFormat::Png).map_err(CvError::Io)
    }
}

fn io_error(e: std::io::Error) -> CvError {
    CvError::Io(IoError::Io(e))
}

impl ReportSink for DirectorySink {
    fn write_annotated_image(&mut self, index: usize, image: &Pix) -> CvResult<()> {
        self.write_png(&format!("{}.roi.png", index), image)
    }

    fn write_statistics(&mut self, table: &StatisticsTable) -> CvResult<()> {
        self.write_text("cv.csv", &table.to_csv())
    }

    fn write_metadata(&mut self, info: &MicroscopyInfo) -> CvResult<()> {
        self.write_text("microscopy_info.csv", &info.to_csv())
    }

    fn write_histogram_plot(&mut self, plot: &Pix) -> CvResult<()> {
        self.write_png("hist.png", plot)
    }

    fn write_roi_info(&mut self, rois: &[RoiDescriptor]) -> CvResult<()> {
        self.write_text("roi_info.csv", &roi_info_csv(rois))
    }
}

/// Keeps every artifact in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Annotated images keyed by image index, in write order
    pub annotated: Vec<(usize, Pix)>,
    /// Statistics CSV
    pub statistics_csv: Option<String>,
    /// Metadata CSV
    pub metadata_csv: Option<String>,
    /// ROI geometry CSV
    pub roi_info_csv: Option<String>,
    /// Histogram plot
    pub histogram_plot: Option<Pix>,
    /// Raw histogram tables
    pub histograms: Vec<HistogramTable>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn write_annotated_image(&mut self, index: usize, image: &Pix) -> CvResult<()> {
        self.annotated.push((index, image.clone()));
        Ok(())
    }

    fn write_statistics(&mut self, table: &StatisticsTable) -> CvResult<()> {
        self.statistics_csv = Some(table.to_csv());
        Ok(())
    }

    fn write_metadata(&mut self, info: &MicroscopyInfo) -> CvResult<()> {
        self.metadata_csv = Some(info.to_csv());
        Ok(())
    }

    fn write_histogram_plot(&mut self, plot: &Pix) -> CvResult<()> {
        self.histogram_plot = Some(plot.clone());
        Ok(())
    }

    fn write_roi_info(&mut self, rois: &[RoiDescriptor]) -> CvResult<()> {
        self.roi_info_csv = Some(roi_info_csv(rois));
        Ok(())
    }

    fn write_histograms(&mut self, tables: &[HistogramTable]) -> CvResult<()> {
        self.histograms = tables.to_vec();
        Ok(())
    }
}
