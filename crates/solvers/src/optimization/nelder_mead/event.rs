use super::{Simplex, Step};

/// Event emitted once per Nelder-Mead iteration.
///
/// The event is emitted after the iteration's candidate points have been
/// evaluated and its step decided, but before the step is applied. The
/// simplex holds the same vertices as this iteration's history entry,
/// ranked best first.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, const N: usize> {
    /// Iteration counter, starting at 1.
    pub iter: usize,

    /// The ranked simplex at the start of the iteration.
    pub simplex: &'a Simplex<N>,

    /// Objectives of the simplex vertices, in the same order.
    pub objectives: &'a [f64],

    /// The step about to be applied.
    pub step: Step,
}

impl<const N: usize> Event<'_, N> {
    /// Returns the best vertex of the current simplex.
    #[must_use]
    pub fn best(&self) -> &[f64; N] {
        self.simplex.best()
    }

    /// Returns the objective of the best vertex.
    #[must_use]
    pub fn best_objective(&self) -> f64 {
        self.objectives[0]
    }
}
