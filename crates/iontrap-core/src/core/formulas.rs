//! Closed-form trap relations.
//!
//! All functions take the electrode parameters `a'` and `b'` in µm, the RF
//! amplitude `v_rf` in volts and the RF drive frequency `f_rf` in MHz. They
//! do not validate their inputs: callers are expected to pass physical
//! geometries (`b' > a' > 0`, see [`GeometryPoint`](super::geometry::GeometryPoint)).

use super::constants::{
    ELEMENTARY_CHARGE, JOULES_TO_EV, MICRON_SCALE, angular_frequency_mhz,
    frequency_mhz_from_angular,
};
use super::geometry::DEFAULT_SLOT_CORRECTION;
use super::species::IonSpecies;
use std::f64::consts::{PI, SQRT_2};

/// Height of the RF null above the electrode plane (µm), using the default
/// slot correction.
#[inline]
pub fn trap_height(a_prime: f64, b_prime: f64) -> f64 {
    corrected_trap_height(a_prime, b_prime, DEFAULT_SLOT_CORRECTION)
}

#[inline]
pub fn corrected_trap_height(a_prime: f64, b_prime: f64, slot_correction: f64) -> f64 {
    slot_correction * (a_prime * b_prime).sqrt()
}

/// Pseudopotential trap depth in eV.
///
/// The surface-trap expression is written for the half-difference pair
/// `a = 2a'`, `b = b' - a'`.
pub fn trap_depth(species: &IonSpecies, a_prime: f64, b_prime: f64, v_rf: f64, f_rf: f64) -> f64 {
    let omega_rf = angular_frequency_mhz(f_rf);
    let a = 2.0 * a_prime;
    let b = b_prime - a_prime;
    let sum = a + b;

    let charge = species.charge() as f64 * ELEMENTARY_CHARGE;
    let e_factor = (charge * v_rf).powi(2) / (PI.powi(2) * species.mass_kg() * omega_rf.powi(2));
    let g_factor = (b / (sum.powi(2) + sum * (2.0 * a * b + a.powi(2)).sqrt())).powi(2);

    e_factor * g_factor * MICRON_SCALE.powi(2) * JOULES_TO_EV
}

/// Geometry-only part of the Mathieu q-parameter, in 1/m².
#[inline]
pub fn geometric_q_factor(a_prime: f64, b_prime: f64) -> f64 {
    8.0 * (b_prime - a_prime) / (PI * (a_prime * b_prime).sqrt() * (a_prime + b_prime).powi(2))
        * MICRON_SCALE.powi(2)
}

/// Mathieu q-parameter. The sign is a convention artifact, so the magnitude
/// is returned.
pub fn q_parameter(species: &IonSpecies, a_prime: f64, b_prime: f64, v_rf: f64, f_rf: f64) -> f64 {
    let omega_rf = angular_frequency_mhz(f_rf);
    let q = ELEMENTARY_CHARGE * v_rf / (species.mass_kg() * omega_rf.powi(2))
        * geometric_q_factor(a_prime, b_prime);
    q.abs()
}

/// Radial secular frequency in MHz, from the lowest-order approximation
/// `ω_sec = q·ω_rf / (2√2)`. Only meaningful for `q ≪ 1`.
pub fn secular_frequency(
    species: &IonSpecies,
    a_prime: f64,
    b_prime: f64,
    v_rf: f64,
    f_rf: f64,
) -> f64 {
    let q = q_parameter(species, a_prime, b_prime, v_rf, f_rf);
    let omega_rf = angular_frequency_mhz(f_rf);
    frequency_mhz_from_angular(q * omega_rf / (2.0 * SQRT_2))
}

/// q required for a target secular frequency at a given drive frequency
/// (inverse of the approximation used by [`secular_frequency`]).
#[inline]
pub fn required_q(target_secular_mhz: f64, f_rf: f64) -> f64 {
    2.0 * SQRT_2 * angular_frequency_mhz(target_secular_mhz) / angular_frequency_mhz(f_rf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn yb() -> IonSpecies {
        IonSpecies::default()
    }

    #[test]
    fn trap_height_matches_closed_form() {
        assert_relative_eq!(trap_height(50.0, 200.0), 0.95 * 100.0, max_relative = 1e-15);
        assert_relative_eq!(corrected_trap_height(50.0, 200.0, 1.2), 120.0, max_relative = 1e-15);
    }

    #[test]
    fn trap_height_is_strictly_increasing_in_b() {
        let a = 70.0;
        let mut previous = trap_height(a, 0.5);
        for i in 2..=400 {
            let h = trap_height(a, i as f64 * 0.5);
            assert!(h > previous, "height not increasing at b'={}", i as f64 * 0.5);
            previous = h;
        }
    }

    #[test]
    fn trap_depth_is_non_negative_for_physical_inputs() {
        let species = yb();
        for &(a, b) in &[(10.0, 11.0), (50.0, 80.0), (70.0, 150.0), (1.0, 1000.0)] {
            for &v in &[1.0, 100.0, 500.0] {
                for &f in &[1.0, 20.0, 80.0] {
                    let depth = trap_depth(&species, a, b, v, f);
                    assert!(depth.is_finite() && depth >= 0.0, "depth={depth} for a={a} b={b}");
                }
            }
        }
    }

    #[test]
    fn trap_depth_scales_with_charge_squared() {
        let single = IonSpecies::new(40, 1).unwrap();
        let double = IonSpecies::new(40, 2).unwrap();
        let d1 = trap_depth(&single, 50.0, 90.0, 150.0, 30.0);
        let d2 = trap_depth(&double, 50.0, 90.0, 150.0, 30.0);
        assert_relative_eq!(d2, 4.0 * d1, max_relative = 1e-12);
    }

    #[test]
    fn q_parameter_is_proportional_to_voltage() {
        let species = yb();
        let q1 = q_parameter(&species, 60.0, 100.0, 120.0, 25.0);
        let q2 = q_parameter(&species, 60.0, 100.0, 240.0, 25.0);
        assert_relative_eq!(q2, 2.0 * q1, max_relative = 1e-14);
    }

    #[test]
    fn q_parameter_is_a_magnitude() {
        let species = yb();
        let q = q_parameter(&species, 60.0, 100.0, -120.0, 25.0);
        assert!(q > 0.0);
        assert_relative_eq!(q, q_parameter(&species, 60.0, 100.0, 120.0, 25.0));
    }

    #[test]
    fn secular_frequency_follows_low_q_approximation() {
        let species = yb();
        let (a, b, v, f) = (55.0, 110.0, 180.0, 30.0);
        let q = q_parameter(&species, a, b, v, f);
        assert_relative_eq!(
            secular_frequency(&species, a, b, v, f),
            q * f / (2.0 * SQRT_2),
            max_relative = 1e-12
        );
    }

    #[test]
    fn required_q_inverts_secular_relation() {
        let q = required_q(2.5, 40.0);
        assert_relative_eq!(q, 2.0 * SQRT_2 * 2.5 / 40.0, max_relative = 1e-14);
    }
}
