use super::grid::stepped;
use thiserror::Error;
use tracing::warn;

/// Heuristic slot correction applied to the trap height when none is given.
pub const DEFAULT_SLOT_CORRECTION: f64 = 0.95;
/// Lower clamp for the slot correction (deep slots).
pub const MIN_SLOT_CORRECTION: f64 = 0.5;
/// Upper clamp for the slot correction (no slots).
pub const MAX_SLOT_CORRECTION: f64 = 1.5;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeometryError {
    #[error("Electrode parameters must be positive and finite (a'={a_prime}, b'={b_prime})")]
    NonPositive { a_prime: f64, b_prime: f64 },
    #[error("b' must be greater than a' (a'={a_prime}, b'={b_prime})")]
    NotOrdered { a_prime: f64, b_prime: f64 },
}

/// Grid guard shared by every sweep: both parameters positive and finite,
/// and `b' > a'`.
#[inline]
pub fn is_physical_geometry(a_prime: f64, b_prime: f64) -> bool {
    GeometryPoint::new(a_prime, b_prime).is_ok()
}

/// A pair of electrode-spacing parameters `(a', b')`, both in µm.
///
/// Instances only exist for physical geometries (`b' > a' > 0`), so the
/// formula layer can be called on them without further checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryPoint {
    a_prime: f64,
    b_prime: f64,
}

impl GeometryPoint {
    pub fn new(a_prime: f64, b_prime: f64) -> Result<Self, GeometryError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(a_prime) || !positive(b_prime) {
            return Err(GeometryError::NonPositive { a_prime, b_prime });
        }
        if b_prime <= a_prime {
            return Err(GeometryError::NotOrdered { a_prime, b_prime });
        }
        Ok(Self { a_prime, b_prime })
    }

    #[inline]
    pub fn a_prime(&self) -> f64 {
        self.a_prime
    }

    #[inline]
    pub fn b_prime(&self) -> f64 {
        self.b_prime
    }
}

/// Multiplicative correction on `√(a'·b')` accounting for slotted electrodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotCorrection(f64);

impl SlotCorrection {
    /// Creates a correction factor, clamping it into `[0.5, 1.5]`.
    /// Non-finite input falls back to the default factor.
    pub fn new(factor: f64) -> Self {
        if !factor.is_finite() {
            warn!(factor, "Non-finite slot correction; using the default.");
            return Self::default();
        }
        let clamped = factor.clamp(MIN_SLOT_CORRECTION, MAX_SLOT_CORRECTION);
        if clamped != factor {
            warn!(
                requested = factor,
                applied = clamped,
                "Slot correction clamped into the supported range."
            );
        }
        Self(clamped)
    }

    #[inline]
    pub fn factor(&self) -> f64 {
        self.0
    }
}

impl Default for SlotCorrection {
    fn default() -> Self {
        Self(DEFAULT_SLOT_CORRECTION)
    }
}

/// The family of geometries sharing one trap height.
///
/// With `h = c·√(a'·b')` fixed, `b' = (h/c)² / a'`. The contour walks `a'`
/// over `[a_min, a_max]` in `a_step` increments and keeps the points with
/// `b' > a' + min_gap` and `b' <= b_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightContour {
    pub height_um: f64,
    pub a_min: f64,
    pub a_max: f64,
    pub a_step: f64,
    pub min_gap: f64,
    pub b_max: f64,
}

impl HeightContour {
    pub fn new(height_um: f64) -> Self {
        Self {
            height_um,
            ..Self::default()
        }
    }

    pub fn points(&self, correction: SlotCorrection) -> Vec<GeometryPoint> {
        let corrected_h_squared = (self.height_um / correction.factor()).powi(2);
        stepped(self.a_min, self.a_max, self.a_step)
            .into_iter()
            .filter_map(|a_prime| {
                let b_prime = corrected_h_squared / a_prime;
                if b_prime > a_prime + self.min_gap && b_prime <= self.b_max {
                    GeometryPoint::new(a_prime, b_prime).ok()
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for HeightContour {
    fn default() -> Self {
        Self {
            height_um: 80.0,
            a_min: 20.0,
            a_max: 100.0,
            a_step: 0.1,
            min_gap: 5.0,
            b_max: 200.0,
        }
    }
}
