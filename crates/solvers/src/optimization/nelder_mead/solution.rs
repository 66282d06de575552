use hyperfit_core::Snapshot;

use crate::optimization::Status;

/// The result of a Nelder–Mead search.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// Final solver status.
    pub status: Status,

    /// Best point found.
    pub x: Vec<f64>,

    /// Objective value at `x`.
    pub objective: f64,

    /// Total constraint violation at `x`.
    pub violation: f64,

    /// Snapshot at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Simplex iterations performed.
    pub iters: usize,

    /// Objective evaluations performed, including failed ones.
    pub evaluations: usize,
}
