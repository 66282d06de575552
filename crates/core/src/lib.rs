//! Core traits and types shared across the hyperfit workspace.
//!
//! This crate defines the abstractions that solvers, observers, material
//! models, and calibration problems build on:
//!
//! - [`Model`]: a deterministic callable mapping a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`MinimizationProblem`]: adapts solver variables to model inputs and
//!   extracts a scalar objective from model outputs

mod model;
mod observer;
mod problem;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problem::MinimizationProblem;
