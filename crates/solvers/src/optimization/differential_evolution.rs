//! Differential evolution for bounded global minimization.
//!
//! # Algorithm
//!
//! The solver evolves a population of `pop_factor · n` candidates (at least
//! five) in the unit hypercube mapped onto finite [`Bounds`]. The initial
//! population is a Latin hypercube sample. Each generation builds one trial
//! vector per member with the `best1bin` strategy: the best member plus a
//! scaled difference of two random members, mixed into the target by
//! binomial crossover. The mutation constant is redrawn every generation from
//! the configured dither range. Trials are evaluated as a batch (in parallel
//! with `rayon` when enabled) and replace their targets when they rank at
//! least as well.
//!
//! Random draws happen on the calling thread and results are collected in
//! population order, so a given seed reproduces the same search whether or
//! not evaluation is parallel.
//!
//! # Convergence
//!
//! The search converges when every member is feasible and the standard
//! deviation of the population objectives is at most
//! `atol + tol · |mean|`. The best member is then optionally polished with a
//! bounded [`nelder_mead`] search.
//!
//! # Observer Events
//!
//! After each batch, the solver emits one evaluation event per member and
//! then an [`Event::Generation`] summary. Observers can return
//! [`Action::StopEarly`] to halt, or [`Action::AssumeWorse`] on evaluation
//! events to give a candidate an infinite objective instead of aborting.
//!
//! [`Bounds`]: crate::optimization::Bounds
//! [`nelder_mead`]: crate::optimization::nelder_mead

mod action;
mod config;
mod error;
mod event;
mod population;
mod search;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::Solution;

use hyperfit_core::{MinimizationProblem, Model, Observer};

use crate::optimization::Domain;

use search::search;

/// Finds the global minimum of the objective over a bounded domain.
///
/// The observer receives the events described in the [module docs](self).
///
/// # Errors
///
/// Returns an error if any bound is infinite, if the model or problem fails
/// and the observer does not return [`Action::AssumeWorse`] to recover, or if
/// no evaluation succeeds.
pub fn minimize<M, P, Obs>(
    model: &M,
    problem: &P,
    domain: &Domain,
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model + Sync,
    M::Input: Send,
    M::Output: Send,
    P: MinimizationProblem<Input = M::Input, Output = M::Output> + Sync,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    search(model, problem, domain, config, observer)
}

/// Finds the global minimum of the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if any bound is infinite or if the model or problem
/// fails during evaluation.
pub fn minimize_unobserved<M, P>(
    model: &M,
    problem: &P,
    domain: &Domain,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model + Sync,
    M::Input: Send,
    M::Output: Send,
    P: MinimizationProblem<Input = M::Input, Output = M::Output> + Sync,
{
    minimize(model, problem, domain, config, ())
}
