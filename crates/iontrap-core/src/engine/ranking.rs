use super::candidate::EvaluatedCandidate;

/// The feasible candidates of a sweep, ranked by ascending required RF
/// amplitude.
///
/// Candidates with equal amplitude keep the order they had in the sweep
/// output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeasibleSet(Vec<EvaluatedCandidate>);

impl FeasibleSet {
    pub fn as_slice(&self) -> &[EvaluatedCandidate] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvaluatedCandidate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The lowest-voltage feasible candidate.
    pub fn best(&self) -> Option<&EvaluatedCandidate> {
        self.0.first()
    }

    pub fn into_vec(self) -> Vec<EvaluatedCandidate> {
        self.0
    }
}

impl<'a> IntoIterator for &'a FeasibleSet {
    type Item = &'a EvaluatedCandidate;
    type IntoIter = std::slice::Iter<'a, EvaluatedCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Filters `candidates` to those meeting every criterion and ranks them.
pub fn feasible_subset(candidates: &[EvaluatedCandidate]) -> FeasibleSet {
    let mut feasible: Vec<EvaluatedCandidate> = candidates
        .iter()
        .filter(|c| c.meets_criteria())
        .copied()
        .collect();
    // `sort_by` is stable.
    feasible.sort_by(|a, b| a.v_rf_required().total_cmp(&b.v_rf_required()));
    FeasibleSet(feasible)
}

/// The first `n` entries of a ranked set.
pub fn top_n(set: &FeasibleSet, n: usize) -> FeasibleSet {
    FeasibleSet(set.0.iter().take(n).copied().collect())
}

/// Aggregate statistics over the output of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SweepSummary {
    pub total: usize,
    pub feasible: usize,
    pub voltage_feasible: usize,
    pub q_feasible: usize,
    pub depth_feasible: usize,
    /// Lowest required RF amplitude over all candidates, feasible or not.
    pub min_v_rf: Option<f64>,
    pub best: Option<EvaluatedCandidate>,
}

impl SweepSummary {
    pub fn from_candidates(candidates: &[EvaluatedCandidate]) -> Self {
        let mut summary = Self {
            total: candidates.len(),
            ..Self::default()
        };
        for c in candidates {
            let f = c.feasibility;
            summary.voltage_feasible += usize::from(f.voltage());
            summary.q_feasible += usize::from(f.q());
            summary.depth_feasible += usize::from(f.depth());
            summary.min_v_rf = Some(match summary.min_v_rf {
                Some(v) => v.min(c.v_rf_required()),
                None => c.v_rf_required(),
            });
            if f.meets_all() {
                summary.feasible += 1;
                // Strict comparison keeps the earliest of equal-voltage candidates.
                if summary
                    .best
                    .is_none_or(|best| c.v_rf_required() < best.v_rf_required())
                {
                    summary.best = Some(*c);
                }
            }
        }
        summary
    }

    /// Share of candidates meeting every criterion, in percent.
    pub fn success_rate(&self) -> f64 {
        100.0 * self.feasible as f64 / self.total.max(1) as f64
    }
}
