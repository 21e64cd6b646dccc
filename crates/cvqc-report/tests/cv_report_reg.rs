//! CV report regression test
//!
//! End-to-end report generation on synthetic acquisitions: ROI geometry,
//! segmentation, statistics with CV normalization, histograms, error
//! kinds, and persistence through directory and failing sinks.

use cvqc_core::{ImageFormat, ImageStack, Pix, PixMut, PixelDepth};
use cvqc_report::{
    CvError, CvReport, CvReportOptions, CvResult, DirectorySink, HistogramTable, ImageInput,
    MicroscopyInfo, ReportSink, RoiDescriptor, StatisticsTable, generate_and_persist,
};
use cvqc_test::{RegParams, square_on_background, uniform_image};
use std::fs;

fn info() -> MicroscopyInfo {
    MicroscopyInfo::new("Confocal", 460.0, 1.4, "1.0x1.0x1.0", 1.0)
}

/// 100x100 background 10 with a centered 30x30 checkerboard of
/// `mean - spread` / `mean + spread`
fn checkerboard_square(mean: u32, spread: u32) -> Pix {
    let mut m = PixMut::new(100, 100, PixelDepth::Bit8).expect("pix");
    m.set_all(10);
    for y in 35..65 {
        for x in 35..65 {
            let v = if (x + y) % 2 == 0 { mean - spread } else { mean + spread };
            m.set_pixel(x, y, v).expect("set");
        }
    }
    m.into()
}

struct FailingSink {
    writes: usize,
}

impl ReportSink for FailingSink {
    fn write_annotated_image(&mut self, _index: usize, _image: &Pix) -> CvResult<()> {
        self.writes += 1;
        Ok(())
    }

    fn write_statistics(&mut self, _table: &StatisticsTable) -> CvResult<()> {
        Err(CvError::Io(cvqc_io::IoError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only output",
        ))))
    }

    fn write_metadata(&mut self, _info: &MicroscopyInfo) -> CvResult<()> {
        self.writes += 1;
        Ok(())
    }

    fn write_histogram_plot(&mut self, _plot: &Pix) -> CvResult<()> {
        self.writes += 1;
        Ok(())
    }

    fn write_roi_info(&mut self, _rois: &[RoiDescriptor]) -> CvResult<()> {
        self.writes += 1;
        Ok(())
    }

    fn write_histograms(&mut self, _tables: &[HistogramTable]) -> CvResult<()> {
        Ok(())
    }
}

#[test]
fn cv_report_reg() {
    let mut rp = RegParams::new("cv_report");
    let options = CvReportOptions::default();

    // --- Test 1: centered square, single image ---
    let pix = square_on_background(100, 100, 10, 30, 200);
    let report = CvReport::generate(&ImageInput::from(pix), info(), &options).expect("report");
    let roi = &report.rois[0];
    rp.compare_values(40.0, roi.rows as f64, 0.0);
    rp.compare_values(40.0, roi.cols as f64, 0.0);
    rp.compare_values(30.0, roi.start_row as f64, 0.0);
    rp.compare_values(30.0, roi.start_col as f64, 0.0);
    rp.compare_strings(b"20%", roi.ratio_label().as_bytes());
    let record = report.statistics.get(0).expect("record");
    rp.compare_values(200.0, record.mean, 0.0);
    rp.compare_values(0.0, record.std, 0.0);
    rp.compare_values(0.0, record.cv, 0.0);
    rp.compare_values(900.0, record.pixel_count as f64, 0.0);
    rp.compare_values(1.0, record.normalized_cv, 0.0);
    let hist = &report.histograms[0];
    rp.compare_values(1.0, hist.len() as f64, 0.0);
    rp.compare_values(200.0, hist.intensities[0] as f64, 0.0);
    rp.compare_values(900.0, hist.counts[0] as f64, 0.0);
    rp.write_pix(&report.annotated[0], ImageFormat::Png).expect("display");

    // --- Test 2: CV 0.05 and 0.1 normalize to 1 and 2 ---
    let stack = ImageStack::new(vec![checkerboard_square(200, 10), checkerboard_square(200, 20)])
        .expect("stack");
    let report = CvReport::generate(&stack.into(), info(), &options).expect("report");
    let cvs: Vec<f64> = report.statistics.iter().map(|r| r.cv).collect();
    rp.compare_values(0.05, cvs[0], 1e-12);
    rp.compare_values(0.1, cvs[1], 1e-12);
    let normalized: Vec<f64> = report.statistics.iter().map(|r| r.normalized_cv).collect();
    rp.compare_values(1.0, normalized[0], 1e-12);
    rp.compare_values(2.0, normalized[1], 1e-12);
    for (record, hist) in report.statistics.iter().zip(&report.histograms) {
        rp.compare_values(record.pixel_count as f64, hist.total_count() as f64, 0.0);
    }
    rp.compare_values(2.0, report.annotated.len() as f64, 0.0);
    rp.write_pix(&report.histogram_plot, ImageFormat::Png).expect("display");

    // --- Test 3: constant image is degenerate ---
    let flat = uniform_image(100, 100, PixelDepth::Bit16, 512);
    let err = CvReport::generate(&ImageInput::from(flat), info(), &options).unwrap_err();
    let degenerate = matches!(err, CvError::DegenerateImage { value: 512, .. });
    rp.compare_values(1.0, if degenerate { 1.0 } else { 0.0 }, 0.0);

    // --- Test 4: object touching the ROI edge leaves nothing ---
    let mut m = PixMut::new(100, 100, PixelDepth::Bit8).expect("pix");
    m.set_all(10);
    for y in 30..70 {
        for x in 30..50 {
            m.set_pixel(x, y, 200).expect("set");
        }
    }
    let err = CvReport::generate(&ImageInput::from(Pix::from(m)), info(), &options).unwrap_err();
    let empty = matches!(err, CvError::EmptySegmentation { index: 0 });
    rp.compare_values(1.0, if empty { 1.0 } else { 0.0 }, 0.0);

    // --- Test 5: raw input of the wrong rank ---
    let err = ImageInput::from_raw(&[10, 10, 10, 1], &[0; 1000], PixelDepth::Bit8).unwrap_err();
    rp.compare_values(1.0, if err.is_shape_error() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 6: directory sink ---
    let tmp = tempfile::tempdir().expect("tempdir");
    let stack = ImageStack::new(vec![checkerboard_square(200, 10), checkerboard_square(150, 30)])
        .expect("stack");
    let mut sink = DirectorySink::new(tmp.path()).expect("sink");
    let (_, persisted) =
        generate_and_persist(&stack.into(), info(), &options, &mut sink).expect("report");
    rp.compare_values(1.0, if persisted.is_ok() { 1.0 } else { 0.0 }, 0.0);
    for name in [
        "0.roi.png",
        "1.roi.png",
        "cv.csv",
        "microscopy_info.csv",
        "roi_info.csv",
        "hist.png",
    ] {
        let exists = tmp.path().join(name).is_file();
        rp.compare_values(1.0, if exists { 1.0 } else { 0.0 }, 0.0);
    }
    let csv = fs::read_to_string(tmp.path().join("cv.csv")).expect("cv.csv");
    let header = csv.lines().next().unwrap_or_default();
    rp.compare_strings(
        b",Standard deviation,Average,Nb pixels,cv,cvs relative to min value",
        header.as_bytes(),
    );
    rp.compare_values(3.0, csv.lines().count() as f64, 0.0);
    let annotated = cvqc_io::read_image(tmp.path().join("0.roi.png")).expect("read back");
    rp.compare_values(100.0, annotated.width() as f64, 0.0);

    // --- Test 7: failing sink keeps the computed report ---
    let mut failing = FailingSink { writes: 0 };
    let input = ImageInput::from(square_on_background(100, 100, 10, 30, 200));
    let (report, persisted) =
        generate_and_persist(&input, info(), &options, &mut failing).expect("report");
    let io_failure = matches!(persisted, Err(CvError::Io(_)));
    rp.compare_values(1.0, if io_failure { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, report.statistics.len() as f64, 0.0);
    rp.compare_values(200.0, report.statistics.get(0).expect("record").mean, 0.0);

    assert!(rp.cleanup(), "cv_report regression test failed");
}
