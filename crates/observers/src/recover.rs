use hyperfit_core::Observer;

use crate::traits::{CanAssumeWorse, HasFailure};

/// Ranks every failed evaluation behind all successful ones.
///
/// Use this when a model fails in part of the search space (a trial
/// stretch that inverts the material, parameters that make a model
/// singular) and the search should simply avoid that region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoverFailures {
    failures: usize,
}

impl RecoverFailures {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of failures recovered so far.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl<E: HasFailure, A: CanAssumeWorse> Observer<E, A> for RecoverFailures {
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.is_failure() {
            self.failures += 1;
            return Some(A::assume_worse());
        }
        None
    }
}

impl<E: HasFailure, A: CanAssumeWorse> Observer<E, A> for &mut RecoverFailures {
    fn observe(&mut self, event: &E) -> Option<A> {
        Observer::<E, A>::observe(&mut **self, event)
    }
}
