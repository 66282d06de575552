//! Solvers for minimization problems.
//!
//! A [`MinimizationProblem`] maps solver variables `x: &[f64]` to model
//! inputs, calls the model, and extracts a scalar objective. Solvers in this
//! module search a [`Domain`] (box bounds plus optional inequality
//! constraints) for the `x` that minimizes that objective.
//!
//! # Solvers
//!
//! - [`nelder_mead`]: derivative-free simplex search from an initial guess
//! - [`differential_evolution`]: population-based global search over finite
//!   bounds, with an optional Nelder–Mead polish
//!
//! # Constraints
//!
//! Constraints are handled by feasibility-first ranking: a point that
//! satisfies every constraint always ranks ahead of one that does not, and
//! infeasible points rank by their total constraint violation.
//!
//! [`MinimizationProblem`]: hyperfit_core::MinimizationProblem

mod bounds;
mod constraint;
mod domain;
mod evaluate;
mod point;
mod score;
mod status;

pub use bounds::{Bounds, BoundsError};
pub use constraint::{Constraint, ConstraintError, LinearConstraint, NonlinearConstraint};
pub use domain::{Domain, DomainError};
pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};
pub use point::Point;
pub use status::Status;

pub(crate) use score::Score;

pub mod differential_evolution;
pub mod nelder_mead;
