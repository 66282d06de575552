//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasObjective`]: events that carry an objective value
//! - [`HasFailure`]: events that may report a failed evaluation
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//! - [`CanAssumeWorse`]: actions that can signal a worse-than-evaluated outcome
//!
//! # Example
//!
//! ```rust
//! use hyperfit_core::Observer;
//! use hyperfit_observers::traits::{CanStopEarly, HasObjective};
//!
//! struct Budget {
//!     max_events: usize,
//!     seen: usize,
//! }
//!
//! impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for Budget {
//!     fn observe(&mut self, _event: &E) -> Option<A> {
//!         self.seen += 1;
//!         (self.seen >= self.max_events).then(A::stop_early)
//!     }
//! }
//! ```

use hyperfit_core::{MinimizationProblem, Model};

use hyperfit_solvers::optimization::{differential_evolution, nelder_mead};

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    ///
    /// Returns `f64::NAN` when the event represents an error and no objective
    /// is available.
    fn objective(&self) -> f64;
}

/// An event that may report a failed evaluation.
pub trait HasFailure {
    /// Returns `true` if the model or problem failed for this event.
    fn is_failure(&self) -> bool;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

/// An action type that can signal a worse-than-evaluated outcome.
pub trait CanAssumeWorse {
    /// Returns the action that ranks this evaluation behind every other.
    fn assume_worse() -> Self;
}

// --- nelder_mead ---

impl<M, P> HasObjective for nelder_mead::Event<'_, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    fn objective(&self) -> f64 {
        match self {
            nelder_mead::Event::Evaluated { point, .. } => point.objective,
            nelder_mead::Event::ModelFailed { .. } | nelder_mead::Event::ProblemFailed { .. } => {
                f64::NAN
            }
        }
    }
}

impl<M, P> HasFailure for nelder_mead::Event<'_, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    fn is_failure(&self) -> bool {
        !matches!(self, nelder_mead::Event::Evaluated { .. })
    }
}

impl CanStopEarly for nelder_mead::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanAssumeWorse for nelder_mead::Action {
    fn assume_worse() -> Self {
        Self::AssumeWorse
    }
}

// --- differential_evolution ---

/// Generation events report the best objective so far.
impl<M, P> HasObjective for differential_evolution::Event<'_, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    fn objective(&self) -> f64 {
        match self {
            differential_evolution::Event::Evaluated { point, .. } => point.objective,
            differential_evolution::Event::Generation { best, .. } => {
                best.map_or(f64::NAN, |best| best.objective)
            }
            differential_evolution::Event::ModelFailed { .. }
            | differential_evolution::Event::ProblemFailed { .. } => f64::NAN,
        }
    }
}

impl<M, P> HasFailure for differential_evolution::Event<'_, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    fn is_failure(&self) -> bool {
        matches!(
            self,
            differential_evolution::Event::ModelFailed { .. }
                | differential_evolution::Event::ProblemFailed { .. }
        )
    }
}

impl CanStopEarly for differential_evolution::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanAssumeWorse for differential_evolution::Action {
    fn assume_worse() -> Self {
        Self::AssumeWorse
    }
}
