//! Reusable observers for hyperfit solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the solvers in `hyperfit-solvers`.
//!
//! # Modules
//!
//! - [`traits`]: Capability traits for cross-solver observers
//!   ([`HasObjective`], [`HasFailure`], [`CanStopEarly`], [`CanAssumeWorse`])
//!
//! # Observers
//!
//! - [`RecoverFailures`]: ranks failed evaluations behind every other point
//! - [`StopBelow`]: stops once the objective reaches a target
//! - [`TracingObserver`]: logs objective progress with `tracing`
//!
//! Observers combine with [`Chain`], which asks each in turn and returns the
//! first action requested.
//!
//! [`Observer`]: hyperfit_core::Observer
//! [`HasObjective`]: traits::HasObjective
//! [`HasFailure`]: traits::HasFailure
//! [`CanStopEarly`]: traits::CanStopEarly
//! [`CanAssumeWorse`]: traits::CanAssumeWorse

mod chain;
mod progress;
mod recover;
mod stop;
pub mod traits;

#[cfg(test)]
mod tests;

pub use chain::Chain;
pub use progress::TracingObserver;
pub use recover::RecoverFailures;
pub use stop::StopBelow;
