//! Numerical solvers for hyperfit problems.
//!
//! Solvers drive a [`Model`] through a [`MinimizationProblem`], reporting
//! progress to an [`Observer`] that may stop the search early or steer it away
//! from failing regions.
//!
//! - [`optimization::nelder_mead`]: local, derivative-free simplex search
//! - [`optimization::differential_evolution`]: global, population-based search
//!
//! [`Model`]: hyperfit_core::Model
//! [`MinimizationProblem`]: hyperfit_core::MinimizationProblem
//! [`Observer`]: hyperfit_core::Observer

pub mod optimization;
