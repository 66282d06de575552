use hyperfit_core::Observer;

use crate::traits::{HasFailure, HasObjective};

/// Logs solver progress with `tracing` and never requests an action.
///
/// Every `every`-th event is logged at `DEBUG` with its running index and
/// objective. Failed evaluations are always logged, at `TRACE`.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingObserver {
    solver: &'static str,
    every: usize,
    events: usize,
    best: f64,
}

impl TracingObserver {
    /// Creates an observer that logs every event under the given solver name.
    #[must_use]
    pub fn new(solver: &'static str) -> Self {
        Self {
            solver,
            every: 1,
            events: 0,
            best: f64::INFINITY,
        }
    }

    /// Creates an observer that logs once per differential evolution
    /// generation.
    ///
    /// Each generation emits one event per member followed by one generation
    /// event, so logging every `population + 1` events lands on the
    /// generation summaries.
    #[must_use]
    pub fn per_generation(solver: &'static str, population: usize) -> Self {
        Self::new(solver).every(population + 1)
    }

    /// Logs only every `every`-th event.
    #[must_use]
    pub fn every(self, every: usize) -> Self {
        Self {
            every: every.max(1),
            ..self
        }
    }

    /// Returns the number of events observed.
    #[must_use]
    pub fn events(&self) -> usize {
        self.events
    }

    /// Returns the lowest objective observed.
    #[must_use]
    pub fn best(&self) -> f64 {
        self.best
    }
}

impl<E, A> Observer<E, A> for &mut TracingObserver
where
    E: HasObjective + HasFailure,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        Observer::<E, A>::observe(&mut **self, event)
    }
}

impl<E, A> Observer<E, A> for TracingObserver
where
    E: HasObjective + HasFailure,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.events += 1;

        if event.is_failure() {
            tracing::trace!(solver = self.solver, event = self.events, "evaluation failed");
            return None;
        }

        let objective = event.objective();
        if objective < self.best {
            self.best = objective;
        }
        if self.events % self.every == 0 {
            tracing::debug!(
                solver = self.solver,
                event = self.events,
                objective,
                best = self.best,
                "solver progress",
            );
        }
        None
    }
}
