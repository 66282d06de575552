/// Actions an observer can take during a Nelder–Mead search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the best point found so far.
    ///
    /// A successful evaluation that triggers the stop is still considered
    /// for the best point.
    StopEarly,

    /// Treat this point as worse than every evaluated point.
    ///
    /// The simplex moves away from it, and the evaluation (if it succeeded)
    /// is not considered for the best solution.
    ///
    /// Use this to recover from model or problem errors in a region the
    /// search should avoid, such as parameters that make a material model
    /// fail.
    AssumeWorse,
}
