//! Linear sample grids for parameter sweeps.

use thiserror::Error;

/// Relative slack used by [`stepped`] so that an end point reached through
/// accumulated rounding (e.g. `10.0 + 800 × 0.05`) is still included.
const STEP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GridError {
    #[error("Grid bounds must be finite (got {start}..={stop})")]
    NonFiniteBounds { start: f64, stop: f64 },
    #[error("Grid must contain at least one point")]
    Empty,
    #[error("Grid step must be positive and finite (got {0})")]
    InvalidStep(f64),
}

/// Generates `n` linearly spaced samples in `[start, stop]`.
///
/// The last sample is exactly `stop`, so grids built from the same bounds
/// always agree on their end points.
#[must_use]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Generates `start + i·step` for every `i` that stays within `stop`.
///
/// Values are computed from the index rather than accumulated, so long scans
/// do not drift. Returns an empty vector when `stop < start`.
#[must_use]
pub fn stepped(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !step.is_finite() || stop < start {
        return Vec::new();
    }
    let span = (stop - start) / step;
    let count = (span + span.abs().max(1.0) * STEP_TOLERANCE).floor() as usize + 1;
    (0..count).map(|i| start + step * i as f64).collect()
}

/// One axis of a sweep grid: `points` evenly spaced values in
/// `[start, stop]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAxis {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

impl GridAxis {
    pub fn new(start: f64, stop: f64, points: usize) -> Result<Self, GridError> {
        let axis = Self {
            start,
            stop,
            points,
        };
        axis.validate()?;
        Ok(axis)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if !self.start.is_finite() || !self.stop.is_finite() {
            return Err(GridError::NonFiniteBounds {
                start: self.start,
                stop: self.stop,
            });
        }
        if self.points == 0 {
            return Err(GridError::Empty);
        }
        Ok(())
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.stop, self.points)
    }
}
