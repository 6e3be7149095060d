use super::candidate::EvaluatedCandidate;
use super::config::{ConfigError, EngineConfig};
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::ranking::{FeasibleSet, SweepSummary, feasible_subset};
use super::solver::solve_required_voltage;
use crate::core::formulas::corrected_trap_height;
use crate::core::geometry::{GeometryPoint, HeightContour, SlotCorrection};
use crate::core::grid::{GridAxis, stepped};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Feasible candidates with `q` at or above this fraction of `q_max` are
/// reported: the secular-frequency approximation assumes `q ≪ 1`.
const Q_APPROXIMATION_WARNING_FRACTION: f64 = 0.9;

/// The geometric grid a sweep walks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepPlan {
    /// `a'` held fixed, `b'` swept.
    FixedA { a_prime: f64, b_axis: GridAxis },
    /// Both `a'` and `b'` swept; `a'` is the outer loop.
    Full { a_axis: GridAxis, b_axis: GridAxis },
    /// Geometries sharing one trap height.
    ConstantHeight(HeightContour),
}

/// Grid points that passed the geometry guard, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoints {
    pub points: Vec<GeometryPoint>,
    pub skipped: usize,
}

impl SweepPlan {
    /// `a' = 70 µm`, `b'` over 50 points in `[80, 150] µm`.
    pub fn fixed_a_default() -> Self {
        Self::FixedA {
            a_prime: 70.0,
            b_axis: GridAxis {
                start: 80.0,
                stop: 150.0,
                points: 50,
            },
        }
    }

    /// `a'` over 20 points in `[50, 69] µm`, `b'` over 30 points in `[70, 150] µm`.
    pub fn full_default() -> Self {
        Self::Full {
            a_axis: GridAxis {
                start: 50.0,
                stop: 69.0,
                points: 20,
            },
            b_axis: GridAxis {
                start: 70.0,
                stop: 150.0,
                points: 30,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FixedA { .. } => "fixed-a",
            Self::Full { .. } => "full",
            Self::ConstantHeight(_) => "constant-height",
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let axis = |name: &'static str, axis: &GridAxis| {
            axis.validate()
                .map_err(|source| ConfigError::InvalidGrid { name, source })
        };
        match self {
            Self::FixedA { a_prime, b_axis } => {
                if !(a_prime.is_finite() && *a_prime > 0.0) {
                    return Err(ConfigError::NonPositive {
                        name: "a_prime",
                        value: *a_prime,
                    });
                }
                axis("b_prime", b_axis)
            }
            Self::Full { a_axis, b_axis } => {
                axis("a_prime", a_axis)?;
                axis("b_prime", b_axis)
            }
            Self::ConstantHeight(contour) => {
                if !(contour.height_um.is_finite() && contour.height_um > 0.0) {
                    return Err(ConfigError::NonPositive {
                        name: "height",
                        value: contour.height_um,
                    });
                }
                if !(contour.a_step.is_finite() && contour.a_step > 0.0) {
                    return Err(ConfigError::NonPositive {
                        name: "a_step",
                        value: contour.a_step,
                    });
                }
                Ok(())
            }
        }
    }

    /// Expands the plan into geometries, applying the `b' > a' > 0` guard.
    pub fn geometries(&self, correction: SlotCorrection) -> GridPoints {
        match self {
            Self::FixedA { a_prime, b_axis } => {
                collect_guarded(b_axis.values().into_iter().map(|b| (*a_prime, b)))
            }
            Self::Full { a_axis, b_axis } => {
                let b_values = b_axis.values();
                collect_guarded(
                    a_axis
                        .values()
                        .into_iter()
                        .flat_map(|a| b_values.iter().map(move |&b| (a, b))),
                )
            }
            Self::ConstantHeight(contour) => {
                let points = contour.points(correction);
                let visited = stepped(contour.a_min, contour.a_max, contour.a_step).len();
                GridPoints {
                    skipped: visited.saturating_sub(points.len()),
                    points,
                }
            }
        }
    }
}

fn collect_guarded(pairs: impl Iterator<Item = (f64, f64)>) -> GridPoints {
    let mut points = Vec::new();
    let mut skipped = 0;
    for (a, b) in pairs {
        match GeometryPoint::new(a, b) {
            Ok(point) => points.push(point),
            Err(e) => {
                debug!(a_prime = a, b_prime = b, "Skipping grid point: {}", e);
                skipped += 1;
            }
        }
    }
    GridPoints { points, skipped }
}

/// Output of one sweep, in grid traversal order and then drive-frequency
/// order within each grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub plan: SweepPlan,
    pub candidates: Vec<EvaluatedCandidate>,
    pub grid_points: usize,
    pub skipped_geometries: usize,
}

impl SweepResult {
    pub fn feasible(&self) -> FeasibleSet {
        feasible_subset(&self.candidates)
    }

    pub fn summary(&self) -> SweepSummary {
        SweepSummary::from_candidates(&self.candidates)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Evaluates one geometry against every candidate drive frequency.
///
/// Solutions with a non-positive required voltage are dropped; every other
/// solution becomes a classified candidate.
pub fn evaluate_point(
    config: &EngineConfig,
    geometry: GeometryPoint,
    f_rf_candidates: &[f64],
) -> Vec<EvaluatedCandidate> {
    let height = corrected_trap_height(
        geometry.a_prime(),
        geometry.b_prime(),
        config.slot_correction.factor(),
    );
    solve_required_voltage(
        &config.species,
        &geometry,
        config.target.secular_frequency_mhz(),
        f_rf_candidates,
    )
    .into_iter()
    .filter(|solution| solution.is_physical())
    .filter_map(|solution| {
        EvaluatedCandidate::classify(&config.species, &config.target, geometry, height, solution)
    })
    .collect()
}

#[instrument(skip_all, name = "sweep", fields(plan = plan.name()))]
pub fn run(
    config: &EngineConfig,
    plan: &SweepPlan,
    reporter: &ProgressReporter,
) -> Result<SweepResult, EngineError> {
    plan.validate()?;
    config.frequencies.validate()?;

    let f_rf_candidates = config.frequencies.candidates();
    let grid = plan.geometries(config.slot_correction);
    info!(
        grid_points = grid.points.len(),
        skipped = grid.skipped,
        frequencies = f_rf_candidates.len(),
        "Starting sweep."
    );

    reporter.report(Progress::SweepStart {
        total_points: grid.points.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = grid.points.iter();

    #[cfg(feature = "parallel")]
    let iterator = grid.points.par_iter();

    let per_point: Vec<Vec<EvaluatedCandidate>> = iterator
        .map(|&geometry| {
            let evaluated = evaluate_point(config, geometry, &f_rf_candidates);
            reporter.report(Progress::PointEvaluated {
                candidates: evaluated.len() as u64,
            });
            evaluated
        })
        .collect();

    reporter.report(Progress::SweepFinish);

    let candidates: Vec<EvaluatedCandidate> = per_point.into_iter().flatten().collect();
    let result = SweepResult {
        plan: *plan,
        grid_points: grid.points.len(),
        skipped_geometries: grid.skipped,
        candidates,
    };

    warn_on_strained_approximation(config, &result.candidates, reporter);
    info!(
        candidates = result.candidates.len(),
        feasible = result.candidates.iter().filter(|c| c.meets_criteria()).count(),
        "Sweep finished."
    );
    Ok(result)
}

fn warn_on_strained_approximation(
    config: &EngineConfig,
    candidates: &[EvaluatedCandidate],
    reporter: &ProgressReporter,
) {
    let threshold = Q_APPROXIMATION_WARNING_FRACTION * config.target.q_max();
    let strained = candidates
        .iter()
        .filter(|c| c.meets_criteria() && c.q() >= threshold)
        .count();
    if strained > 0 {
        warn!(
            count = strained,
            q_threshold = threshold,
            "Feasible candidates close to q_max; the low-q secular frequency approximation may be inaccurate there."
        );
        reporter.report(Progress::Message(format!(
            "{strained} feasible design(s) have q >= {threshold:.3}; secular frequencies there are approximate."
        )));
    }
}
