use log::{debug, trace, warn};

use amoeba_core::{Model, Observer, OptimizationProblem};

use crate::optimization::MemoizedEvaluator;

use super::{Action, Config, Error, Event, Init, Solution, Status, step::plan};

/// Core Nelder-Mead loop.
///
/// Each iteration ranks the simplex, tests for convergence and the
/// optional iteration ceiling, records the simplex as it stood before
/// ranking, decides one step, reports it to the observer, and applies it.
pub(super) fn search<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    init: Init<N>,
    config: &Config<N>,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OptimizationProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    config.validate()?;
    let mut simplex = init.build(config)?;

    let mut evaluator = MemoizedEvaluator::new(model, problem);
    if let Some(bounds) = config.bounds {
        evaluator = evaluator.with_bounds(bounds);
    }

    debug!(
        "nelder-mead: starting in {} dimensions with {:?}",
        N, config.convergence
    );

    let mut history = Vec::new();
    let status = loop {
        let start = simplex.clone();
        let objectives = simplex.rank(|x| evaluator.evaluate(x))?;

        if config.convergence.is_converged(&simplex, &objectives) {
            break Status::Converged;
        }
        if config.max_iters.is_some_and(|max| history.len() >= max) {
            warn!(
                "nelder-mead: no convergence after {} iterations, best objective {}",
                history.len(),
                objectives[0]
            );
            break Status::MaxIters;
        }

        history.push(start);
        let iter = history.len();

        let next = plan(&simplex, &objectives, &config.coefficients, |x| {
            evaluator.evaluate(x)
        })?;

        let event = Event {
            iter,
            simplex: &simplex,
            objectives: &objectives,
            step: next.step(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            break Status::StoppedByObserver;
        }

        trace!(
            "nelder-mead: iter {iter}: {} (best objective {})",
            next.step(),
            objectives[0]
        );
        next.apply(&mut simplex, &config.coefficients);
    };

    // Every vertex of the final simplex was ranked, so this is a cache hit.
    let x = *simplex.best();
    let (objective, snapshot) = evaluator.evaluate_with_snapshot(&x)?;
    let snapshot = snapshot.clone();
    let iters = history.len();

    debug!(
        "nelder-mead: {status:?} after {iters} iterations and {} evaluations, objective {objective}",
        evaluator.len()
    );

    Ok(Solution {
        status,
        x,
        objective,
        snapshot,
        iters,
        simplex,
        history,
        evaluations: evaluator.into_log(),
    })
}
