use amoeba_core::Snapshot;

use super::Simplex;

/// Indicates why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The convergence test passed.
    Converged,

    /// Reached the configured iteration ceiling without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a Nelder-Mead solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O, const N: usize> {
    /// Final solver status.
    pub status: Status,

    /// Best vertex of the final simplex.
    pub x: [f64; N],

    /// Objective at `x`, including any bounds penalty.
    pub objective: f64,

    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Number of iterations recorded.
    pub iters: usize,

    /// The final ranked simplex.
    pub simplex: Simplex<N>,

    /// The simplex as it stood at the start of each iteration, before
    /// ranking, in solve order. The first entry is the starting simplex.
    pub history: Vec<Simplex<N>>,

    /// Objective of every distinct point evaluated, in evaluation order.
    pub evaluations: Vec<f64>,
}

impl<I, O, const N: usize> Solution<I, O, N> {
    /// Consumes the solution and returns the simplex history and the
    /// evaluation log.
    #[must_use]
    pub fn into_history(self) -> (Vec<Simplex<N>>, Vec<f64>) {
        (self.history, self.evaluations)
    }
}
