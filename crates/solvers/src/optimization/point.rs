use super::{Evaluation, Score};

/// An evaluated point in solver space.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Solver variables.
    pub x: Vec<f64>,

    /// Objective value at `x`.
    pub objective: f64,

    /// Total constraint violation at `x`, zero when feasible.
    pub violation: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: Vec<f64>, objective: f64, violation: f64) -> Self {
        Self {
            x,
            objective,
            violation,
        }
    }

    /// A point at `x` that ranks behind every evaluated point.
    pub(crate) fn worst(x: Vec<f64>) -> Self {
        Self::new(x, f64::INFINITY, f64::INFINITY)
    }

    pub(crate) fn from_eval<I, O>(eval: &Evaluation<I, O>, violation: f64) -> Self {
        Self::new(eval.x.clone(), eval.objective, violation)
    }

    /// Returns `true` if every constraint is satisfied at this point.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }

    pub(crate) fn score(&self) -> Score {
        Score::new(self.objective, self.violation)
    }
}
