use hyperfit_core::Observer;

use crate::traits::{CanStopEarly, HasObjective};

/// Stops a solver once an event reports an objective at or below a target.
///
/// Useful to end a calibration as soon as the fit is good enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopBelow {
    target: f64,
}

impl StopBelow {
    #[must_use]
    pub fn new(target: f64) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }
}

impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for StopBelow {
    fn observe(&mut self, event: &E) -> Option<A> {
        // NaN never compares below the target.
        (event.objective() <= self.target).then(A::stop_early)
    }
}
