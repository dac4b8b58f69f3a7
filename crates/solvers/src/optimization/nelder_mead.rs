//! Nelder-Mead simplex search for multivariable minimization.
//!
//! # Algorithm
//!
//! The solver keeps a simplex of `N + 1` points in `N` dimensions. Each
//! iteration ranks the vertices by objective (best first), then applies
//! exactly one transformation:
//!
//! - **Reflect** the worst vertex through the centroid of the others,
//!   `worst + 2α (centroid - worst)`
//! - **Expand** the reflection further, `centroid + γ (reflected - centroid)`,
//!   when the reflection beats the best vertex
//! - **Contract** the worst vertex toward the centroid,
//!   `centroid + ρ (worst - centroid)`, when the reflection does not beat
//!   the worst vertex
//! - **Shrink** every vertex toward the best, `best + σ (vertex - best)`,
//!   when the contraction fails as well
//!
//! Defaults are `α = 1`, `γ = 2`, `ρ = 0.5`, `σ = 0.5`.
//!
//! # Termination
//!
//! The ranked simplex is tested with the configured [`Convergence`] policy
//! at the start of every iteration. By default the solve ends when the best
//! and second-best vertices are closer than `1e-4`.
//!
//! There is no iteration limit unless [`Config::max_iters`] is set. An
//! objective with a flat or degenerate region can keep the solver running
//! indefinitely; callers that need bounded execution should set
//! `max_iters` or stop from an observer.
//!
//! # Evaluation
//!
//! All evaluations go through a fresh [`MemoizedEvaluator`] per solve, so a
//! point is never evaluated twice. Points outside [`Config::bounds`] receive
//! a `+∞` penalty and are never ranked ahead of a feasible vertex.
//!
//! # History
//!
//! The [`Solution`] carries the simplex as it stood at the start of every
//! iteration, before that iteration's ranking, so the first entry is the
//! starting simplex verbatim. It also carries the objective of every distinct
//! point in evaluation order. The final ranked simplex is returned separately.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration, after the step is decided
//! and before it is applied. Observers can return [`Action::StopEarly`] to
//! halt and return the best vertex of the current simplex.
//!
//! [`MemoizedEvaluator`]: crate::optimization::MemoizedEvaluator

mod action;
mod config;
mod error;
mod event;
mod init;
mod search;
mod simplex;
mod solution;
mod step;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Coefficients, Config, ConfigError, Convergence};
pub use error::Error;
pub use event::Event;
pub use init::Init;
pub use simplex::Simplex;
pub use solution::{Solution, Status};
pub use step::Step;

use amoeba_core::{Model, Observer, OptimizationProblem};

use search::search;

/// Finds a local minimum of the objective using the Nelder-Mead method.
///
/// The observer receives an [`Event`] for each iteration.
/// See the [module docs](self) for details on event timing and termination.
///
/// # Errors
///
/// Returns an error if the configuration or starting simplex is invalid, or
/// if the model or problem fails during evaluation.
pub fn minimize<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    init: Init<N>,
    config: &Config<N>,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OptimizationProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    search(model, problem, init, config, observer)
}

/// Finds a local minimum of the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the configuration or starting simplex is invalid, or
/// if the model or problem fails during evaluation.
pub fn minimize_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    init: Init<N>,
    config: &Config<N>,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OptimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    minimize(model, problem, init, config, ())
}
