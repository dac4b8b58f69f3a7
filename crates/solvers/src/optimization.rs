//! Solvers for optimization problems: minimizing a scalar objective.
//!
//! An [`OptimizationProblem`] maps solver variables `x: [f64; N]` to model
//! inputs, calls the model, and extracts a scalar objective. Solvers in this
//! module search for the `x` that minimizes that objective.
//!
//! # Solvers
//!
//! - [`nelder_mead`] — derivative-free simplex search for a local minimum of
//!   a function of `N` variables
//!
//! # Evaluation
//!
//! Solvers reach the model only through a [`MemoizedEvaluator`], which
//! caches objectives by exact coordinates, applies an optional [`Bounds`]
//! penalty, and keeps the log of every distinct evaluation.
//!
//! [`OptimizationProblem`]: amoeba_core::OptimizationProblem

mod bounds;

pub mod memoize;
pub mod nelder_mead;

pub use bounds::{Bounds, BoundsError};
pub use memoize::{EvalError, EvalResult, MemoizedEvaluator};
