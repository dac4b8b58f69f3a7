use amoeba_core::Observer;

use crate::traits::{CanStopEarly, HasObjective};

/// Stops a solve whose best objective has stopped improving.
///
/// The guard tracks the lowest objective seen so far. Once `patience`
/// consecutive events pass without a strictly lower objective, it requests
/// an early stop.
///
/// Simplex searches on flat or degenerate objectives can keep shrinking
/// without ever meeting their convergence test; this observer gives callers
/// a bound on that without choosing an iteration limit up front.
#[derive(Debug, Clone)]
pub struct StallGuard {
    patience: usize,
    best: f64,
    stalled: usize,
}

impl StallGuard {
    /// Creates a guard that stops after `patience` iterations without
    /// improvement.
    #[must_use]
    pub fn new(patience: usize) -> Self {
        Self {
            patience,
            best: f64::INFINITY,
            stalled: 0,
        }
    }

    /// Returns the lowest objective observed so far.
    #[must_use]
    pub fn best(&self) -> f64 {
        self.best
    }

    /// Returns the number of consecutive events without improvement.
    #[must_use]
    pub fn stalled(&self) -> usize {
        self.stalled
    }
}

impl<E, A> Observer<E, A> for StallGuard
where
    E: HasObjective,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let objective = event.objective();
        if objective < self.best {
            self.best = objective;
            self.stalled = 0;
            return None;
        }

        self.stalled += 1;
        (self.stalled >= self.patience).then(A::stop_early)
    }
}

impl<E, A> Observer<E, A> for &mut StallGuard
where
    E: HasObjective,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
