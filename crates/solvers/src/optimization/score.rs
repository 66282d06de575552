use std::cmp::Ordering;

/// Feasibility-first ranking of a candidate.
///
/// Candidates compare by total constraint violation first and by objective
/// second. A feasible candidate (zero violation) therefore always ranks
/// ahead of an infeasible one, and two feasible candidates rank by objective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Score {
    pub(crate) violation: f64,
    pub(crate) objective: f64,
}

impl Score {
    pub(crate) fn new(objective: f64, violation: f64) -> Self {
        let clean = |v: f64| if v.is_nan() { f64::INFINITY } else { v };
        Self {
            violation: clean(violation),
            objective: clean(objective),
        }
    }

    /// A score that ranks behind every evaluated candidate.
    pub(crate) fn worst() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY)
    }

    pub(crate) fn rank(&self, other: &Self) -> Ordering {
        self.violation
            .total_cmp(&other.violation)
            .then(self.objective.total_cmp(&other.objective))
    }

    pub(crate) fn is_better_than(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Less
    }

    /// Returns `true` if this score lowers the violation of `other` by more
    /// than `tol`, or keeps it and lowers the objective by more than `tol`.
    pub(crate) fn improves_on(&self, other: &Self, tol: f64) -> bool {
        other.violation - self.violation > tol
            || (self.violation <= other.violation && other.objective - self.objective > tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feasible_beats_infeasible_regardless_of_objective() {
        let feasible = Score::new(100.0, 0.0);
        let infeasible = Score::new(-100.0, 1e-12);

        assert!(feasible.is_better_than(&infeasible));
        assert!(!infeasible.is_better_than(&feasible));
    }

    #[test]
    fn infeasible_rank_by_violation() {
        let small = Score::new(5.0, 0.1);
        let large = Score::new(1.0, 0.2);

        assert!(small.is_better_than(&large));
    }

    #[test]
    fn improvement_needs_more_than_the_tolerance() {
        let anchor = Score::new(10.0, 0.5);

        assert!(Score::new(50.0, 0.0).improves_on(&anchor, 1e-9));
        assert!(Score::new(9.0, 0.5).improves_on(&anchor, 1e-9));
        assert!(!Score::new(10.0 - 1e-12, 0.5).improves_on(&anchor, 1e-9));
        assert!(!Score::new(1.0, 0.6).improves_on(&anchor, 1e-9));
        assert!(Score::new(1.0, 0.0).improves_on(&Score::worst(), 1e-9));
    }

    #[test]
    fn nan_ranks_behind_finite() {
        let nan = Score::new(f64::NAN, 0.0);
        let finite = Score::new(1e300, 0.0);

        assert!(finite.is_better_than(&nan));
        assert!(Score::new(0.0, 0.0).is_better_than(&Score::worst()));
    }
}
