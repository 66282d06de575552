//! Nelder–Mead simplex search for multi-variable minimization.
//!
//! # Algorithm
//!
//! The solver keeps a simplex of `n + 1` points in `n` dimensions and
//! replaces its worst vertex by reflecting, expanding or contracting it
//! through the centroid of the others. When none of these improve on the
//! worst vertex, the whole simplex shrinks toward the best one. The initial
//! simplex perturbs each component of the initial guess by 5% (or by
//! `0.00025` when the component is zero), reflecting the perturbation back
//! across any bound it crosses.
//!
//! # Bounds and constraints
//!
//! Every trial point is clipped into the [`Domain`] bounds before it is
//! evaluated. Inequality constraints are handled by feasibility-first
//! ranking, so a feasible point always ranks ahead of an infeasible one.
//!
//! # Convergence
//!
//! The search converges once every vertex lies within
//! [`Config::x_abs_tol`] of the best vertex and every objective lies within
//! [`Config::f_abs_tol`] of the best objective. Hitting the iteration or
//! evaluation limit is reported as [`Status::MaxIters`], not as an error.
//!
//! Clipping and feasibility-first ranking can collapse the simplex onto a
//! bound or constraint boundary short of the constrained minimum. When the
//! best point lies on a bound, or the domain has constraints, a converged
//! simplex is therefore rebuilt around the best point. The search reports
//! convergence once a rebuilt simplex converges without improving on the
//! point it was rebuilt around by more than [`Config::f_abs_tol`].
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per evaluation:
//!
//! - [`Event::Evaluated`]: evaluation succeeded
//! - [`Event::ModelFailed`]: model returned an error
//! - [`Event::ProblemFailed`]: problem returned an error (input or objective)
//!
//! Observers can return [`Action::StopEarly`] to halt immediately, or
//! [`Action::AssumeWorse`] to rank the point behind every other (useful for
//! error recovery or steering the search away from a region).
//!
//! [`Domain`]: crate::optimization::Domain
//! [`Status::MaxIters`]: crate::optimization::Status::MaxIters

mod action;
mod config;
mod error;
mod event;
mod search;
mod simplex;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::Solution;

use hyperfit_core::{MinimizationProblem, Model, Observer};

use crate::optimization::Domain;

use search::search;

/// Finds a minimum of the objective using Nelder–Mead simplex search.
///
/// The observer receives an [`Event`] for each evaluation.
/// See the [module docs](self) for details on observer actions.
///
/// # Errors
///
/// Returns an error if `x0` does not fit the domain, if the model or problem
/// fails and the observer does not return [`Action::AssumeWorse`] to recover,
/// or if no evaluation succeeds before the search stops.
pub fn minimize<M, P, Obs>(
    model: &M,
    problem: &P,
    x0: &[f64],
    domain: &Domain,
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    search(model, problem, x0, domain, config, observer)
}

/// Finds a minimum of the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if `x0` does not fit the domain or if the model or
/// problem fails during evaluation.
pub fn minimize_unobserved<M, P>(
    model: &M,
    problem: &P,
    x0: &[f64],
    domain: &Domain,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
{
    minimize(model, problem, x0, domain, config, ())
}
