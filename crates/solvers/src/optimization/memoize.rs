//! Memoized objective evaluation with an optional bounds penalty.
//!
//! [`MemoizedEvaluator`] is the only way the simplex solver reaches the
//! user's model. Each distinct point is evaluated at most once; repeated
//! queries return the cached objective without calling the model again.
//!
//! # Cache key
//!
//! Points are keyed by the exact bit pattern of each coordinate
//! ([`f64::to_bits`]). Two points that are numerically close but not
//! bit-identical are separate cache entries, and `0.0` and `-0.0` are
//! distinct keys. The cache assumes the model is referentially transparent
//! for a given coordinate tuple.
//!
//! # Evaluation log
//!
//! Every cache miss appends its objective to an ordered, append-only log.
//! The log is diagnostic output only: one entry per distinct point, in the
//! order the points were first evaluated. Failed evaluations are neither
//! cached nor logged.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::trace;
use thiserror::Error;

use amoeba_core::{Model, OptimizationProblem, Snapshot};

use super::Bounds;

/// Errors that can occur when evaluating an optimization problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// Failed to construct input or compute the objective.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Type alias for the result of a fallible evaluation of `M` and `P`.
pub type EvalResult<T, M, P, const N: usize> =
    Result<T, EvalError<<M as Model>::Error, <P as OptimizationProblem<N>>::Error>>;

type Key<const N: usize> = [u64; N];

struct Cached<I, O> {
    objective: f64,
    snapshot: Snapshot<I, O>,
}

/// Evaluates an optimization problem, caching results by exact coordinates.
///
/// When [`Bounds`] are configured, a point with any coordinate outside its
/// interval has `+∞` added to its raw objective. All infeasible points
/// therefore rank equally last, behind every feasible point. The raw value
/// is still computed, so the model is called for infeasible points too.
/// A penalized objective is always `+∞`, even when the raw value is NaN
/// or `-∞`. An in-bounds NaN is kept, and the solver ranks it last.
///
/// Each solve should use its own evaluator; sharing one across runs shares
/// its cache and log.
pub struct MemoizedEvaluator<'a, M, P, const N: usize>
where
    M: Model,
{
    model: &'a M,
    problem: &'a P,
    bounds: Option<Bounds<N>>,
    cache: HashMap<Key<N>, Cached<M::Input, M::Output>>,
    log: Vec<f64>,
}

impl<'a, M, P, const N: usize> MemoizedEvaluator<'a, M, P, N>
where
    M: Model,
    P: OptimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    /// Creates an unbounded evaluator with an empty cache.
    pub fn new(model: &'a M, problem: &'a P) -> Self {
        Self {
            model,
            problem,
            bounds: None,
            cache: HashMap::new(),
            log: Vec::new(),
        }
    }

    /// Penalizes points outside `bounds` with `+∞`.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds<N>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Returns the configured bounds, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<&Bounds<N>> {
        self.bounds.as_ref()
    }

    /// Returns the objective at `x`, evaluating the model only on a cache miss.
    ///
    /// # Errors
    ///
    /// Returns an error if input construction, the model call, or the
    /// objective computation fails. Errors are passed through unchanged.
    pub fn evaluate(&mut self, x: &[f64; N]) -> EvalResult<f64, M, P, N> {
        self.evaluate_with_snapshot(x).map(|(objective, _)| objective)
    }

    /// Returns the objective at `x` along with the model input/output there.
    ///
    /// # Errors
    ///
    /// Returns an error if input construction, the model call, or the
    /// objective computation fails.
    pub fn evaluate_with_snapshot(
        &mut self,
        x: &[f64; N],
    ) -> EvalResult<(f64, &Snapshot<M::Input, M::Output>), M, P, N> {
        let cached = match self.cache.entry(x.map(f64::to_bits)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let input = self.problem.input(x).map_err(EvalError::Problem)?;
                let output = self.model.call(&input).map_err(EvalError::Model)?;
                let raw = self
                    .problem
                    .objective(&input, &output)
                    .map_err(EvalError::Problem)?;

                let objective = match &self.bounds {
                    Some(bounds) if !bounds.contains(x) => penalize(raw),
                    _ => raw,
                };

                trace!("evaluated {x:?}: objective = {objective}");
                self.log.push(objective);
                entry.insert(Cached {
                    objective,
                    snapshot: Snapshot::new(input, output),
                })
            }
        };

        Ok((cached.objective, &cached.snapshot))
    }

    /// Returns the objectives of every distinct point, in evaluation order.
    #[must_use]
    pub fn log(&self) -> &[f64] {
        &self.log
    }

    /// Consumes the evaluator and returns its evaluation log.
    #[must_use]
    pub fn into_log(self) -> Vec<f64> {
        self.log
    }

    /// Returns the number of distinct points evaluated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if no point has been evaluated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Adds the `+∞` bounds penalty.
///
/// A NaN or `-∞` raw objective would leave `raw + ∞` as NaN, so those
/// become `+∞` as well.
fn penalize(raw: f64) -> f64 {
    let penalized = raw + f64::INFINITY;
    if penalized.is_nan() {
        f64::INFINITY
    } else {
        penalized
    }
}
