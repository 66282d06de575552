/// Actions an observer can take during differential evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the best member found so far.
    ///
    /// A successful evaluation that triggers the stop is still considered
    /// for the best member. The polishing step is skipped.
    StopEarly,

    /// Treat this evaluation as worse than every other.
    ///
    /// A failed evaluation is given an infinite objective instead of aborting
    /// the search. A successful one is excluded from the best solution.
    /// Ignored for [`Event::Generation`](super::Event::Generation).
    AssumeWorse,
}
