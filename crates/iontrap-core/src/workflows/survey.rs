use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::ranking::{FeasibleSet, top_n};
use crate::engine::sweep::{self, SweepPlan, SweepResult};
use tracing::{info, instrument};

/// Number of ranked designs kept from the full sweep unless the caller asks
/// for another count.
pub const DEFAULT_BEST_COUNT: usize = 10;

/// A fixed-`a'` sweep side by side with a full 2D sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyResult {
    pub fixed: SweepResult,
    pub full: SweepResult,
    /// Lowest-voltage feasible designs of the full sweep.
    pub best: FeasibleSet,
}

#[instrument(skip_all, name = "survey_workflow")]
pub fn run(
    config: &EngineConfig,
    fixed_plan: &SweepPlan,
    full_plan: &SweepPlan,
    best_count: usize,
    reporter: &ProgressReporter,
) -> Result<SurveyResult, EngineError> {
    fixed_plan.validate()?;
    full_plan.validate()?;

    let fixed = reporter.phase("Fixed Geometry Sweep", || {
        sweep::run(config, fixed_plan, reporter)
    })?;
    let full = reporter.phase("Full Geometry Sweep", || {
        sweep::run(config, full_plan, reporter)
    })?;

    let best = top_n(&full.feasible(), best_count);

    let fixed_summary = fixed.summary();
    let full_summary = full.summary();
    info!(
        fixed_feasible = fixed_summary.feasible,
        fixed_total = fixed_summary.total,
        full_feasible = full_summary.feasible,
        full_total = full_summary.total,
        "Survey complete."
    );
    Ok(SurveyResult { fixed, full, best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::Progress;
    use crate::engine::ranking::feasible_subset;
    use std::sync::Mutex;

    #[test]
    fn survey_runs_both_sweeps_and_ranks_the_full_one() {
        let config = EngineConfig::default();
        let result = run(
            &config,
            &SweepPlan::fixed_a_default(),
            &SweepPlan::full_default(),
            DEFAULT_BEST_COUNT,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert!(result.fixed.candidates.iter().all(|c| c.a_prime() == 70.0));
        assert!(result.full.candidates.iter().all(|c| c.a_prime() < 70.0));
        assert!(result.best.len() <= DEFAULT_BEST_COUNT);
        let ranked = feasible_subset(&result.full.candidates);
        assert_eq!(result.best.as_slice(), &ranked.as_slice()[..result.best.len()]);
    }

    #[test]
    fn survey_keeps_the_requested_number_of_designs() {
        let result = run(
            &EngineConfig::default(),
            &SweepPlan::fixed_a_default(),
            &SweepPlan::full_default(),
            25,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(result.best.len(), 25);
        let ranked = feasible_subset(&result.full.candidates);
        assert_eq!(result.best.as_slice(), &ranked.as_slice()[..25]);
    }

    #[test]
    fn survey_reports_one_phase_per_sweep() {
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|p| {
            if let Progress::PhaseStart { name } = p {
                phases.lock().unwrap().push(name);
            }
        }));
        run(
            &EngineConfig::default(),
            &SweepPlan::fixed_a_default(),
            &SweepPlan::full_default(),
            DEFAULT_BEST_COUNT,
            &reporter,
        )
        .unwrap();
        assert_eq!(
            *phases.lock().unwrap(),
            vec!["Fixed Geometry Sweep", "Full Geometry Sweep"]
        );
    }
}
