//! Closed-form inverse solve for the RF amplitude that produces a target
//! secular frequency.
//!
//! The q-parameter is linear in `V_rf`, so for each candidate drive frequency
//! the required amplitude follows algebraically from the required q; there is
//! no iteration or root finding.

use crate::core::constants::{ELEMENTARY_CHARGE, angular_frequency_mhz};
use crate::core::formulas::{geometric_q_factor, required_q};
use crate::core::geometry::GeometryPoint;
use crate::core::species::IonSpecies;

/// Result of the inverse solve at one candidate drive frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySolution {
    /// Drive frequency in MHz.
    pub f_rf: f64,
    /// RF amplitude (V) needed to reach the target secular frequency.
    pub v_rf_required: f64,
    /// Mathieu q at that operating point.
    pub q_required: f64,
}

impl FrequencySolution {
    /// Only strictly positive amplitudes are physically meaningful.
    #[inline]
    pub fn is_physical(&self) -> bool {
        self.v_rf_required > 0.0
    }
}

/// Solves for the RF amplitude at a single drive frequency.
pub fn solve_at(
    species: &IonSpecies,
    geometry: &GeometryPoint,
    target_secular_mhz: f64,
    f_rf: f64,
) -> FrequencySolution {
    let omega_rf = angular_frequency_mhz(f_rf);
    let q_required = required_q(target_secular_mhz, f_rf);
    let g = geometric_q_factor(geometry.a_prime(), geometry.b_prime());
    let v_rf_required = q_required * species.mass_kg() * omega_rf.powi(2) / (ELEMENTARY_CHARGE * g);

    FrequencySolution {
        f_rf,
        v_rf_required,
        q_required,
    }
}

/// Solves for the RF amplitude at every candidate drive frequency.
///
/// One solution is emitted per candidate, in candidate order, whatever the
/// sign of the resulting amplitude; filtering is left to the caller.
pub fn solve_required_voltage(
    species: &IonSpecies,
    geometry: &GeometryPoint,
    target_secular_mhz: f64,
    f_rf_candidates: &[f64],
) -> Vec<FrequencySolution> {
    f_rf_candidates
        .iter()
        .map(|&f_rf| solve_at(species, geometry, target_secular_mhz, f_rf))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formulas::{q_parameter, secular_frequency};
    use crate::core::grid::linspace;
    use approx::assert_relative_eq;

    fn geometry(a: f64, b: f64) -> GeometryPoint {
        GeometryPoint::new(a, b).unwrap()
    }

    #[test]
    fn round_trip_reproduces_target_secular_frequency() {
        let species = IonSpecies::default();
        for &(a, b) in &[(50.0, 70.0), (60.0, 120.0), (70.0, 150.0), (5.0, 400.0)] {
            for &target in &[0.5, 2.5, 4.0] {
                for f_rf in linspace(10.0, 50.0, 17) {
                    let geom = geometry(a, b);
                    let sol = solve_at(&species, &geom, target, f_rf);
                    let f_sec = secular_frequency(&species, a, b, sol.v_rf_required, f_rf);
                    assert_relative_eq!(f_sec, target, max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn solved_q_matches_forward_q_parameter() {
        let species = IonSpecies::new(40, 1).unwrap();
        let geom = geometry(55.0, 95.0);
        let sol = solve_at(&species, &geom, 2.0, 30.0);
        let q = q_parameter(&species, 55.0, 95.0, sol.v_rf_required, 30.0);
        assert_relative_eq!(q, sol.q_required, max_relative = 1e-12);
    }

    #[test]
    fn one_solution_per_candidate_in_order() {
        let species = IonSpecies::default();
        let candidates = linspace(10.0, 50.0, 100);
        let solutions = solve_required_voltage(&species, &geometry(70.0, 100.0), 2.5, &candidates);
        assert_eq!(solutions.len(), 100);
        for (sol, f) in solutions.iter().zip(&candidates) {
            assert_eq!(sol.f_rf, *f);
            assert!(sol.is_physical());
        }
    }

    #[test]
    fn required_voltage_grows_with_drive_frequency() {
        let species = IonSpecies::default();
        let solutions =
            solve_required_voltage(&species, &geometry(60.0, 110.0), 2.5, &linspace(10.0, 50.0, 9));
        assert!(
            solutions
                .windows(2)
                .all(|w| w[1].v_rf_required > w[0].v_rf_required)
        );
    }

    #[test]
    fn negative_candidate_frequencies_yield_non_physical_solutions() {
        let species = IonSpecies::default();
        let solutions = solve_required_voltage(&species, &geometry(60.0, 110.0), 2.5, &[-20.0, 20.0]);
        assert_eq!(solutions.len(), 2);
        assert!(!solutions[0].is_physical());
        assert!(solutions[1].is_physical());
    }

    #[test]
    fn zero_target_frequency_is_not_physical() {
        let species = IonSpecies::default();
        let sol = solve_at(&species, &geometry(60.0, 110.0), 0.0, 20.0);
        assert_eq!(sol.v_rf_required, 0.0);
        assert!(!sol.is_physical());
    }
}
