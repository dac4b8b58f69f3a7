//! Core traits and types for amoeba.
//!
//! This crate defines the shared abstractions that the simplex solver,
//! observers, and user models build on:
//!
//! - [`Model`] — a callable that maps a typed input to a typed output
//! - [`Snapshot`] — a captured input/output pair from a model call
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`OptimizationProblem`] — adapts solver variables to model inputs and
//!   extracts an objective from outputs
//! - [`Objective`] — wraps a plain function of `N` coordinates so it can be
//!   used as both the model and the problem

mod model;
mod objective;
mod observer;
mod problems;

pub use model::{Model, Snapshot};
pub use objective::Objective;
pub use observer::Observer;
pub use problems::OptimizationProblem;
