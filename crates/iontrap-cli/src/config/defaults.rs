use iontrap::core::grid::GridAxis;
use iontrap::engine::config::{FrequencyRange, TrapSpecification};
use iontrap::workflows::search::SearchParams;
use iontrap::workflows::survey::DEFAULT_BEST_COUNT;

/// Values used when neither the command line nor the config file sets them.
pub struct DefaultsConfig {
    pub species: String,
    pub target: TrapSpecification,
    pub frequencies: FrequencyRange,
    pub fixed_a: f64,
    pub fixed_b: GridAxis,
    pub full_a: GridAxis,
    pub full_b: GridAxis,
    pub survey_top: usize,
    pub search: SearchParams,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            species: "171Yb+".to_string(),
            target: TrapSpecification::default(),
            frequencies: FrequencyRange::default(),
            fixed_a: 70.0,
            fixed_b: GridAxis {
                start: 80.0,
                stop: 150.0,
                points: 50,
            },
            full_a: GridAxis {
                start: 50.0,
                stop: 69.0,
                points: 20,
            },
            full_b: GridAxis {
                start: 70.0,
                stop: 150.0,
                points: 30,
            },
            survey_top: DEFAULT_BEST_COUNT,
            search: SearchParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iontrap::engine::sweep::SweepPlan;

    #[test]
    fn survey_defaults_match_library_plans() {
        let d = DefaultsConfig::default();
        assert_eq!(
            SweepPlan::FixedA {
                a_prime: d.fixed_a,
                b_axis: d.fixed_b
            },
            SweepPlan::fixed_a_default()
        );
        assert_eq!(
            SweepPlan::Full {
                a_axis: d.full_a,
                b_axis: d.full_b
            },
            SweepPlan::full_default()
        );
    }
}
