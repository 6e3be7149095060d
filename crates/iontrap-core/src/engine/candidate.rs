use super::config::TrapSpecification;
use super::solver::FrequencySolution;
use crate::core::formulas::{corrected_trap_height, q_parameter, secular_frequency, trap_depth};
use crate::core::geometry::{GeometryPoint, SlotCorrection};
use crate::core::species::IonSpecies;

/// The three independent feasibility checks of a design point. The combined
/// verdict is derived from the flags on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Feasibility {
    voltage: bool,
    q: bool,
    depth: bool,
}

impl Feasibility {
    pub fn evaluate(spec: &TrapSpecification, v_rf: f64, q: f64, depth_ev: f64) -> Self {
        Self {
            voltage: spec.voltage_ok(v_rf),
            q: spec.q_ok(q),
            depth: spec.depth_ok(depth_ev),
        }
    }

    #[inline]
    pub fn voltage(&self) -> bool {
        self.voltage
    }

    #[inline]
    pub fn q(&self) -> bool {
        self.q
    }

    #[inline]
    pub fn depth(&self) -> bool {
        self.depth
    }

    #[inline]
    pub fn meets_all(&self) -> bool {
        self.voltage && self.q && self.depth
    }
}

/// One evaluated design point: a geometry, an operating point from the
/// inverse solve, the derived height and depth, and its feasibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatedCandidate {
    pub geometry: GeometryPoint,
    /// Trap height in µm.
    pub height: f64,
    pub solution: FrequencySolution,
    /// Trap depth in eV.
    pub depth: f64,
    pub feasibility: Feasibility,
}

impl EvaluatedCandidate {
    /// Evaluates depth and feasibility for a solution of the inverse solve.
    /// Returns `None` for non-physical solutions (`V_rf <= 0`).
    pub fn classify(
        species: &IonSpecies,
        spec: &TrapSpecification,
        geometry: GeometryPoint,
        height: f64,
        solution: FrequencySolution,
    ) -> Option<Self> {
        if !solution.is_physical() {
            return None;
        }
        let depth = trap_depth(
            species,
            geometry.a_prime(),
            geometry.b_prime(),
            solution.v_rf_required,
            solution.f_rf,
        );
        let feasibility =
            Feasibility::evaluate(spec, solution.v_rf_required, solution.q_required, depth);
        Some(Self {
            geometry,
            height,
            solution,
            depth,
            feasibility,
        })
    }

    pub fn a_prime(&self) -> f64 {
        self.geometry.a_prime()
    }
    pub fn b_prime(&self) -> f64 {
        self.geometry.b_prime()
    }
    pub fn f_rf(&self) -> f64 {
        self.solution.f_rf
    }
    pub fn v_rf_required(&self) -> f64 {
        self.solution.v_rf_required
    }
    pub fn q(&self) -> f64 {
        self.solution.q_required
    }
    pub fn meets_criteria(&self) -> bool {
        self.feasibility.meets_all()
    }
}

/// Forward evaluation of a fully specified operating point
/// `(geometry, V_rf, F_rf)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub geometry: GeometryPoint,
    pub v_rf: f64,
    pub f_rf: f64,
    pub q: f64,
    pub depth: f64,
    pub height: f64,
    pub secular_frequency: f64,
    pub feasibility: Feasibility,
    /// Whether the secular frequency reaches the target.
    pub secular_ok: bool,
}

impl OperatingPoint {
    pub fn evaluate(
        species: &IonSpecies,
        correction: SlotCorrection,
        spec: &TrapSpecification,
        geometry: GeometryPoint,
        v_rf: f64,
        f_rf: f64,
    ) -> Self {
        let (a, b) = (geometry.a_prime(), geometry.b_prime());
        let q = q_parameter(species, a, b, v_rf, f_rf);
        let depth = trap_depth(species, a, b, v_rf, f_rf);
        let secular = secular_frequency(species, a, b, v_rf, f_rf);
        Self {
            geometry,
            v_rf,
            f_rf,
            q,
            depth,
            height: corrected_trap_height(a, b, correction.factor()),
            secular_frequency: secular,
            feasibility: Feasibility::evaluate(spec, v_rf, q, depth),
            secular_ok: secular >= spec.secular_frequency_mhz(),
        }
    }

    /// All three limits hold and the secular frequency reaches the target.
    pub fn meets_criteria(&self) -> bool {
        self.feasibility.meets_all() && self.secular_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::solver::solve_at;
    use approx::assert_relative_eq;

    fn spec() -> TrapSpecification {
        TrapSpecification::default()
    }

    #[test]
    fn meets_all_requires_every_flag() {
        let spec = spec();
        assert!(Feasibility::evaluate(&spec, 200.0, 0.2, 0.07).meets_all());
        let low_depth = Feasibility::evaluate(&spec, 200.0, 0.2, 0.01);
        assert!(low_depth.voltage() && low_depth.q() && !low_depth.depth());
        assert!(!low_depth.meets_all());
        assert!(!Feasibility::evaluate(&spec, 300.0, 0.2, 0.07).meets_all());
        assert!(!Feasibility::evaluate(&spec, 200.0, 0.3, 0.07).meets_all());
    }

    #[test]
    fn classify_discards_non_physical_solutions() {
        let species = IonSpecies::default();
        let geometry = GeometryPoint::new(60.0, 100.0).unwrap();
        let solution = FrequencySolution {
            f_rf: 20.0,
            v_rf_required: -1.0,
            q_required: -0.1,
        };
        assert!(EvaluatedCandidate::classify(&species, &spec(), geometry, 70.0, solution).is_none());
        let zero = FrequencySolution {
            v_rf_required: 0.0,
            ..solution
        };
        assert!(EvaluatedCandidate::classify(&species, &spec(), geometry, 70.0, zero).is_none());
    }

    #[test]
    fn classify_computes_depth_at_required_voltage() {
        let species = IonSpecies::default();
        let geometry = GeometryPoint::new(60.0, 100.0).unwrap();
        let solution = solve_at(&species, &geometry, 2.5, 25.0);
        let candidate =
            EvaluatedCandidate::classify(&species, &spec(), geometry, 73.6, solution).unwrap();
        assert_relative_eq!(
            candidate.depth,
            trap_depth(&species, 60.0, 100.0, solution.v_rf_required, 25.0)
        );
        assert_eq!(candidate.height, 73.6);
        assert_eq!(candidate.f_rf(), 25.0);
        assert_eq!(
            candidate.meets_criteria(),
            candidate.feasibility.voltage() && candidate.feasibility.q() && candidate.feasibility.depth()
        );
    }

    #[test]
    fn operating_point_requires_secular_frequency_target() {
        let species = IonSpecies::default();
        let geometry = GeometryPoint::new(60.0, 100.0).unwrap();
        let solution = solve_at(&species, &geometry, 2.5, 25.0);
        let at_target = OperatingPoint::evaluate(
            &species,
            SlotCorrection::default(),
            &spec(),
            geometry,
            solution.v_rf_required * 1.001,
            25.0,
        );
        assert!(at_target.secular_ok);
        assert_relative_eq!(at_target.q, solution.q_required * 1.001, max_relative = 1e-9);

        let below = OperatingPoint::evaluate(
            &species,
            SlotCorrection::default(),
            &spec(),
            geometry,
            solution.v_rf_required * 0.5,
            25.0,
        );
        assert!(!below.secular_ok);
        assert!(!below.meets_criteria());
    }
}
