//! cvqc-test - Regression test framework for the CV quality-control report
//!
//! This crate provides a regression test harness with two modes:
//!
//! - **Compare**: Check computed values and images against expectations
//! - **Display**: Additionally write intermediate images to `tests/regout`
//!   for visual inspection
//!
//! and a set of synthetic grayscale images, so regression tests need no
//! fixture files.
//!
//! # Usage
//!
//! ```ignore
//! use cvqc_test::{RegParams, square_on_background};
//!
//! let mut rp = RegParams::new("segment");
//! let pix = square_on_background(100, 100, 10, 30, 200);
//! rp.compare_values(200.0, pix.get_pixel(50, 50).unwrap() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"
//! - `RUST_LOG`: Log level for the library crates (default `warn`)

mod error;
mod params;
mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use synth::{gradient_square, square_on_background, uniform_image};

use std::sync::Once;

static LOGGER: Once = Once::new();

/// Install the test logger once per process
///
/// The level comes from `RUST_LOG` and defaults to `warn`.
pub fn init_logging() {
    LOGGER.call_once(|| {
        // Another test binary harness may already own the global logger
        let _ = simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Warn)
            .env()
            .init();
    });
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // cvqc-test is at crates/cvqc-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
