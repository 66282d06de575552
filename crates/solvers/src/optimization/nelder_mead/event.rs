use hyperfit_core::{MinimizationProblem, Model, Observer};

use crate::optimization::{EvalError, Point};

use super::Action;

/// Events emitted by the Nelder–Mead solver, one per evaluation.
///
/// Each event carries `best`, the best point evaluated so far. It is `None`
/// until the first evaluation succeeds.
pub enum Event<'a, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    /// Successful evaluation of a point.
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
}

impl<M, P> Event<'_, M, P>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    /// Returns the x value that was evaluated (or attempted).
    #[must_use]
    pub fn x(&self) -> &[f64] {
        match self {
            Self::Evaluated { point, .. } => &point.x,
            Self::ModelFailed { x, .. } | Self::ProblemFailed { x, .. } => x,
        }
    }

    /// Returns the best point so far.
    #[must_use]
    pub fn best(&self) -> Option<&Point> {
        match self {
            Self::Evaluated { best, .. }
            | Self::ModelFailed { best, .. }
            | Self::ProblemFailed { best, .. } => *best,
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
