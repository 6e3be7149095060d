use approx::assert_relative_eq;
use iontrap::core::formulas::{secular_frequency, trap_height};
use iontrap::core::geometry::GeometryPoint;
use iontrap::core::grid::GridAxis;
use iontrap::core::species::IonSpecies;
use iontrap::engine::config::{EngineConfigBuilder, FrequencyRange, TrapSpecificationBuilder};
use iontrap::engine::progress::ProgressReporter;
use iontrap::engine::ranking::feasible_subset;
use iontrap::engine::sweep::{self, SweepPlan, evaluate_point};

fn ytterbium_config() -> iontrap::engine::config::EngineConfig {
    let target = TrapSpecificationBuilder::new()
        .secular_frequency_mhz(2.5)
        .q_max(0.25)
        .v_rf_max(250.0)
        .depth_min_ev(0.05)
        .depth_max_ev(0.1)
        .build()
        .unwrap();
    EngineConfigBuilder::new()
        .species(IonSpecies::new(171, 1).unwrap())
        .target(target)
        .frequencies(FrequencyRange::new(10.0, 50.0, 100).unwrap())
        .build()
        .unwrap()
}

fn fixed_plan() -> SweepPlan {
    SweepPlan::FixedA {
        a_prime: 70.0,
        b_axis: GridAxis::new(80.0, 150.0, 50).unwrap(),
    }
}

#[test]
fn fixed_sweep_covers_every_b_prime() {
    let config = ytterbium_config();
    let result = sweep::run(&config, &fixed_plan(), &ProgressReporter::new()).unwrap();

    let b_values = GridAxis::new(80.0, 150.0, 50).unwrap().values();
    for b in &b_values {
        assert!(
            result.candidates.iter().any(|c| c.b_prime() == *b),
            "no candidate at b' = {b}"
        );
    }
    for c in &result.candidates {
        assert_relative_eq!(c.height, trap_height(70.0, c.b_prime()), max_relative = 1e-12);
        let secular = secular_frequency(
            &config.species,
            c.a_prime(),
            c.b_prime(),
            c.v_rf_required(),
            c.f_rf(),
        );
        assert_relative_eq!(secular, 2.5, max_relative = 1e-9);
    }
}

#[test]
fn fixed_sweep_at_seventy_microns_is_voltage_limited() {
    // Below q_max the required amplitude at a' = 70 µm never drops under ~346 V.
    let result = sweep::run(&ytterbium_config(), &fixed_plan(), &ProgressReporter::new()).unwrap();
    assert!(feasible_subset(&result.candidates).is_empty());
    assert!(
        result
            .candidates
            .iter()
            .filter(|c| c.feasibility.q())
            .all(|c| !c.feasibility.voltage())
    );
}

#[test]
fn sweeps_are_reproducible() {
    let config = ytterbium_config();
    let plan = SweepPlan::full_default();
    let first = sweep::run(&config, &plan, &ProgressReporter::new()).unwrap();
    let second = sweep::run(&config, &plan, &ProgressReporter::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn full_default_sweep_reproduces_reference_counts() {
    let result = sweep::run(
        &ytterbium_config(),
        &SweepPlan::full_default(),
        &ProgressReporter::new(),
    )
    .unwrap();
    assert_eq!(result.grid_points, 600);
    assert_eq!(result.candidates.len(), 60_000);
    assert_eq!(result.feasible().len(), 2006);
    let best = result.summary().best.unwrap();
    assert_relative_eq!(best.v_rf_required(), 176.9495398155171, max_relative = 1e-12);
}

#[test]
fn sweep_output_matches_sequential_evaluation() {
    // Holds with and without the `parallel` feature.
    let config = ytterbium_config();
    let plan = SweepPlan::full_default();
    let result = sweep::run(&config, &plan, &ProgressReporter::new()).unwrap();

    let frequencies = config.frequencies.candidates();
    let expected: Vec<_> = plan
        .geometries(config.slot_correction)
        .points
        .into_iter()
        .flat_map(|g| evaluate_point(&config, g, &frequencies))
        .collect();
    assert_eq!(result.candidates, expected);
}

#[test]
fn best_design_is_the_cheapest_feasible_candidate() {
    let config = ytterbium_config();
    let result = sweep::run(&config, &SweepPlan::full_default(), &ProgressReporter::new()).unwrap();
    let summary = result.summary();
    let best = summary.best.unwrap();

    let min_feasible = result
        .candidates
        .iter()
        .filter(|c| c.meets_criteria())
        .map(|c| c.v_rf_required())
        .fold(f64::INFINITY, f64::min);
    assert_eq!(best.v_rf_required(), min_feasible);
    assert_eq!(result.feasible().best().copied(), Some(best));
    assert!(GeometryPoint::new(best.a_prime(), best.b_prime()).is_ok());
}
