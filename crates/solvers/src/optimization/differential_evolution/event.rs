use hyperfit_core::{MinimizationProblem, Model, Observer};

use crate::optimization::{EvalError, Point};

use super::Action;

/// Events emitted by the differential evolution solver.
///
/// Each generation is evaluated as a batch, possibly in parallel. Once the
/// batch completes, one evaluation event per member is emitted in population
/// order on the calling thread, followed by one [`Event::Generation`].
pub enum Event<'a, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    /// Successful evaluation of a candidate.
    Evaluated {
        /// The evaluated point.
        point: &'a Point,

        /// The model input at this point.
        input: &'a M::Input,

        /// The model output at this point.
        output: &'a M::Output,

        /// The best point so far, not including this one.
        best: Option<&'a Point>,
    },

    /// Model evaluation failed.
    ModelFailed {
        /// The x value where evaluation failed.
        x: &'a [f64],

        /// The best point so far.
        best: Option<&'a Point>,

        /// The model error.
        error: &'a M::Error,
    },

    /// Problem method failed (input construction or objective computation).
    ProblemFailed {
        /// The x value where evaluation failed.
        x: &'a [f64],

        /// The best point so far.
        best: Option<&'a Point>,

        /// The problem error.
        error: &'a P::Error,
    },

    /// A generation finished.
    ///
    /// Generation `0` is the initial population.
    Generation {
        /// Generation index.
        generation: usize,

        /// The best point so far.
        best: Option<&'a Point>,

        /// Mean objective over the population.
        mean: f64,

        /// Standard deviation of the objective over the population.
        std: f64,
    },
}

impl<M, P> Event<'_, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    /// Returns the best point so far.
    #[must_use]
    pub fn best(&self) -> Option<&Point> {
        match self {
            Self::Evaluated { best, .. }
            | Self::ModelFailed { best, .. }
            | Self::ProblemFailed { best, .. }
            | Self::Generation { best, .. } => *best,
        }
    }

    /// Emits a failure event and returns the observer's action.
    pub(super) fn emit_failure<Obs>(
        x: &[f64],
        best: Option<&Point>,
        error: &EvalError<M::Error, P::Error>,
        observer: &mut Obs,
    ) -> Option<Action>
    where
        Obs: for<'a> Observer<Event<'a, M, P>, Action>,
    {
        match error {
            EvalError::Model(e) => {
                let event = Event::ModelFailed { x, best, error: e };
                observer.observe(&event)
            }
            EvalError::Problem(e) => {
                let event = Event::ProblemFailed { x, best, error: e };
                observer.observe(&event)
            }
        }
    }
}
