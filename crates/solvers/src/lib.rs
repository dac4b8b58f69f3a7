//! Derivative-free solvers for amoeba.
//!
//! See [`optimization`] for the memoized evaluator and the Nelder-Mead
//! simplex solver.

pub mod optimization;
