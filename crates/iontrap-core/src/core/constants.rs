//! Physical constants and unit scale factors used by the trap formulas.
//!
//! Values match the trap design tables (CODATA 2002/2006 era for the
//! elementary charge and Boltzmann constant), not the 2019 SI exact values.

use std::f64::consts::PI;

/// Elementary charge _e_ in coulombs (C).
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_46e-19;
/// Proton mass _mₚ_ in kilograms (kg).
pub const PROTON_MASS: f64 = 1.672_621_92e-27;
/// Boltzmann constant _k_B_ in joules per kelvin (J/K).
pub const BOLTZMANN_CONSTANT: f64 = 1.380_648_52e-23;
/// Number of electronvolts in one joule.
pub const JOULES_TO_EV: f64 = 6.241_509e18;

/// Hertz per megahertz.
pub const MHZ: f64 = 1.0e6;
/// Electronvolts per millielectronvolt.
pub const MEV: f64 = 1.0e-3;
/// Micrometres per metre. Geometric factors computed from µm inputs carry
/// `1/µm²`; multiplying by `MICRON_SCALE²` converts them to `1/m²`.
pub const MICRON_SCALE: f64 = 1.0e6;

/// Returns the angular frequency ω = 2π·f for a frequency given in MHz.
#[inline]
#[must_use]
pub fn angular_frequency_mhz(f_mhz: f64) -> f64 {
    2.0 * PI * f_mhz * MHZ
}

/// Converts an angular frequency (rad/s) back to a linear frequency in MHz.
#[inline]
#[must_use]
pub fn frequency_mhz_from_angular(omega: f64) -> f64 {
    omega / (2.0 * PI * MHZ)
}

/// Converts an energy in joules to electronvolts.
#[inline]
#[must_use]
pub fn joules_to_ev(joules: f64) -> f64 {
    joules * JOULES_TO_EV
}

/// Thermal energy k_B·T of a temperature in kelvin, expressed in meV.
#[inline]
#[must_use]
pub fn thermal_energy_mev(kelvin: f64) -> f64 {
    joules_to_ev(BOLTZMANN_CONSTANT * kelvin) / MEV
}
