//! Forward scans of the drive parameters at a single geometry.
//!
//! Where a sweep asks "which amplitude hits the target secular frequency",
//! a scan holds one drive quantity fixed and evaluates every operating point
//! along the other, reporting q, depth and secular frequency as they fall.

use super::candidate::OperatingPoint;
use super::config::{ConfigError, EngineConfig};
use crate::core::geometry::GeometryPoint;
use crate::core::grid::stepped;
use tracing::{info, instrument};

/// Maximum `|q - target|` for a point to count as lying on a fixed-q line.
pub const Q_MATCH_TOLERANCE: f64 = 1e-3;

/// Which drive quantity is held fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanMode {
    /// RF amplitude in V; the drive frequency is scanned.
    FixedVoltage(f64),
    /// Drive frequency in MHz; the amplitude is scanned.
    FixedFrequency(f64),
    /// Mathieu q; both quantities are scanned and only matching points kept.
    FixedQ(f64),
}

/// Ranges and step sizes of the scanned drive quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveWindow {
    pub v_min: f64,
    pub v_max: f64,
    pub v_step: f64,
    pub f_min_mhz: f64,
    pub f_max_mhz: f64,
    pub f_step_mhz: f64,
}

impl Default for DriveWindow {
    fn default() -> Self {
        Self {
            v_min: 50.0,
            v_max: 400.0,
            v_step: 1.0,
            f_min_mhz: 10.0,
            f_max_mhz: 50.0,
            f_step_mhz: 0.05,
        }
    }
}

impl DriveWindow {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("v_min", self.v_min),
            ("v_max", self.v_max),
            ("f_min", self.f_min_mhz),
            ("f_max", self.f_max_mhz),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        for (name, value) in [("v_step", self.v_step), ("f_step", self.f_step_mhz)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }

    pub fn voltages(&self) -> Vec<f64> {
        stepped(self.v_min, self.v_max, self.v_step)
    }

    pub fn frequencies(&self) -> Vec<f64> {
        stepped(self.f_min_mhz, self.f_max_mhz, self.f_step_mhz)
    }
}

/// Evaluates the operating points of `geometry` selected by `mode`.
///
/// Points come out with the amplitude as the outer loop and the frequency as
/// the inner loop.
#[instrument(skip_all, name = "drive_scan", fields(mode = ?mode))]
pub fn scan(
    config: &EngineConfig,
    geometry: GeometryPoint,
    mode: ScanMode,
    window: &DriveWindow,
) -> Result<Vec<OperatingPoint>, ConfigError> {
    window.validate()?;
    let evaluate = |v_rf: f64, f_rf: f64| {
        OperatingPoint::evaluate(
            &config.species,
            config.slot_correction,
            &config.target,
            geometry,
            v_rf,
            f_rf,
        )
    };

    let points: Vec<OperatingPoint> = match mode {
        ScanMode::FixedVoltage(v_rf) => window
            .frequencies()
            .into_iter()
            .map(|f_rf| evaluate(v_rf, f_rf))
            .collect(),
        ScanMode::FixedFrequency(f_rf) => window
            .voltages()
            .into_iter()
            .map(|v_rf| evaluate(v_rf, f_rf))
            .collect(),
        ScanMode::FixedQ(q_target) => {
            let frequencies = window.frequencies();
            window
                .voltages()
                .into_iter()
                .flat_map(|v_rf| frequencies.iter().map(move |&f_rf| (v_rf, f_rf)))
                .map(|(v_rf, f_rf)| evaluate(v_rf, f_rf))
                .filter(|p| (p.q - q_target).abs() < Q_MATCH_TOLERANCE)
                .collect()
        }
    };

    info!(
        points = points.len(),
        feasible = points.iter().filter(|p| p.meets_criteria()).count(),
        "Drive scan finished."
    );
    Ok(points)
}
