use crate::core::grid::GridAxis;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::ranking::{FeasibleSet, top_n};
use crate::engine::sweep::{self, SweepPlan, SweepResult};
use tracing::{info, instrument, warn};

/// Geometry window and result size of a design search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub a_axis: GridAxis,
    pub b_axis: GridAxis,
    pub max_solutions: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            a_axis: GridAxis {
                start: 50.0,
                stop: 75.0,
                points: 30,
            },
            b_axis: GridAxis {
                start: 70.0,
                stop: 150.0,
                points: 40,
            },
            max_solutions: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// At most `max_solutions` feasible designs, lowest voltage first.
    pub feasible: FeasibleSet,
    pub all: SweepResult,
}

#[instrument(skip_all, name = "search_workflow")]
pub fn run(
    config: &EngineConfig,
    params: &SearchParams,
    reporter: &ProgressReporter,
) -> Result<SearchResult, EngineError> {
    let plan = SweepPlan::Full {
        a_axis: params.a_axis,
        b_axis: params.b_axis,
    };

    let all = reporter.phase("Design Search", || sweep::run(config, &plan, reporter))?;
    let feasible = top_n(&all.feasible(), params.max_solutions);

    if feasible.is_empty() {
        warn!("No design meets every criterion; consider relaxing the target specification.");
    } else {
        info!(
            solutions = feasible.len(),
            evaluated = all.len(),
            "Design search complete."
        );
    }
    Ok(SearchResult { feasible, all })
}
