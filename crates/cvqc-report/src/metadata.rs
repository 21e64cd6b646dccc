//! Acquisition metadata carried alongside the report

use crate::stats::format_float;
use crate::{CvError, CvResult};

/// Microscope settings of the acquisition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MicroscopyInfo {
    /// Free-form microscope description, e.g. "Confocal"
    pub microscope_type: String,
    /// Emission wavelength in nm
    pub wavelength_nm: f64,
    /// Numerical aperture of the objective
    pub numerical_aperture: f64,
    /// Voxel size as `"x" x "y" x "z"`, e.g. "1.0x1.0x1.0"
    pub sampling_rate: String,
    /// Pinhole size in Airy units
    pub pinhole_airy_units: f64,
}

impl MicroscopyInfo {
    pub fn new(
        microscope_type: impl Into<String>,
        wavelength_nm: f64,
        numerical_aperture: f64,
        sampling_rate: impl Into<String>,
        pinhole_airy_units: f64,
    ) -> Self {
        Self {
            microscope_type: microscope_type.into(),
            wavelength_nm,
            numerical_aperture,
            sampling_rate: sampling_rate.into(),
            pinhole_airy_units,
        }
    }

    /// `(parameter, value)` rows
    pub fn table(&self) -> Vec<(String, String)> {
        vec![
            ("Microscope type".to_string(), self.microscope_type.clone()),
            ("Wavelength (nm)".to_string(), format_float(self.wavelength_nm)),
            (
                "Numerical aperture".to_string(),
                format_float(self.numerical_aperture),
            ),
            ("Sampling rate".to_string(), self.sampling_rate.clone()),
            (
                "Pinhole (airy units)".to_string(),
                format_float(self.pinhole_airy_units),
            ),
        ]
    }

    /// Render [`table`](Self::table) as two-column CSV
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Parameter,Value\n");
        for (name, value) in self.table() {
            out.push_str(&csv_field(&name));
            out.push(',');
            out.push_str(&csv_field(&value));
            out.push('\n');
        }
        out
    }

    /// Parse the sampling rate into its per-axis components
    ///
    /// # Errors
    ///
    /// [`CvError::InvalidOptions`] when a component is not a number.
    pub fn sampling_rate_components(&self) -> CvResult<Vec<f64>> {
        self.sampling_rate
            .split(['x', 'X'])
            .map(|part| {
                part.trim().parse::<f64>().map_err(|_| {
                    CvError::InvalidOptions(format!(
                        "sampling rate {:?} is not of the form AxBxC",
                        self.sampling_rate
                    ))
                })
            })
            .collect()
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
