use hyperfit_core::Snapshot;

use crate::optimization::Status;

/// The result of a differential evolution search.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// Final solver status.
    ///
    /// Reflects the generation loop. Polishing never changes it.
    pub status: Status,

    /// Best point found, after polishing.
    pub x: Vec<f64>,

    /// Objective value at `x`.
    pub objective: f64,

    /// Total constraint violation at `x`.
    pub violation: f64,

    /// Snapshot at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Generations completed.
    pub iters: usize,

    /// Objective evaluations performed, including the polish.
    pub evaluations: usize,
}
