//! Capability traits for solver-agnostic observers.
//!
//! # Event traits
//!
//! - [`HasObjective`] — events that carry a best objective value
//! - [`HasSimplex`] — events that carry the current simplex
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use amoeba_core::Observer;
//! use amoeba_observers::traits::{CanStopEarly, HasObjective};
//!
//! struct GoodEnough {
//!     target: f64,
//! }
//!
//! impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.objective() <= self.target).then(A::stop_early)
//!     }
//! }
//! ```

use amoeba_solvers::optimization::nelder_mead::{self, Simplex};

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the best objective known when the event was emitted.
    fn objective(&self) -> f64;
}

/// An event that carries an `N`-dimensional simplex.
pub trait HasSimplex<const N: usize> {
    /// Returns the simplex, best vertex first.
    fn simplex(&self) -> &Simplex<N>;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl<const N: usize> HasObjective for nelder_mead::Event<'_, N> {
    fn objective(&self) -> f64 {
        self.best_objective()
    }
}

impl<const N: usize> HasSimplex<N> for nelder_mead::Event<'_, N> {
    fn simplex(&self) -> &Simplex<N> {
        self.simplex
    }
}

impl CanStopEarly for nelder_mead::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
