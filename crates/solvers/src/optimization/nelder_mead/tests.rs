use std::cell::Cell;
use std::convert::Infallible;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use thiserror::Error;

use amoeba_core::{Model, Objective, OptimizationProblem};

use crate::optimization::Bounds;

use super::{
    Action, Coefficients, Config, ConfigError, Convergence, Error, Event, Init, Simplex, Status,
    Step, minimize, minimize_unobserved,
};

/// f(x, y) = (x - 2)² + (y - 2)², minimum 0 at (2, 2).
fn paraboloid(x: &[f64; 2]) -> f64 {
    (x[0] - 2.0).powi(2) + (x[1] - 2.0).powi(2)
}

/// Rosenbrock's banana function, minimum 0 at (1, 1).
fn rosenbrock(x: &[f64; 2]) -> f64 {
    (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2)
}

fn unit_triangle() -> Init<2> {
    Init::Simplex(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]])
}

fn unit_box() -> Bounds<2> {
    Bounds::new([[0.0, 1.0], [0.0, 1.0]]).unwrap()
}

/// Lowest objective among the vertices of a simplex, in any order.
fn lowest<const N: usize>(simplex: &Simplex<N>, f: impl Fn(&[f64; N]) -> f64) -> f64 {
    simplex.vertices().iter().map(f).fold(f64::INFINITY, f64::min)
}

fn is_non_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[1] <= pair[0])
}

#[test]
fn converges_to_unconstrained_minimum() {
    let objective = Objective::new(paraboloid);

    let solution = minimize_unobserved(&objective, &objective, unit_triangle(), &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_abs_diff_eq!(solution.x[0], 2.0, epsilon = 1e-3);
    assert_abs_diff_eq!(solution.x[1], 2.0, epsilon = 1e-3);
    assert!(solution.objective < 1e-6);

    assert_eq!(solution.snapshot.input, solution.x);
    assert_relative_eq!(solution.snapshot.output, solution.objective);

    let last = solution.history.last().expect("at least one iteration");
    assert!(lowest(last, paraboloid) < 1e-4);
}

#[test]
fn history_starts_with_initial_simplex_verbatim() {
    let objective = Objective::new(paraboloid);

    let solution = minimize_unobserved(&objective, &objective, unit_triangle(), &Config::default())
        .expect("should converge");

    assert_eq!(
        solution.history[0].vertices(),
        &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
    );

    // Ranking gives [1, 0], [0, 1], [0, 0] (the tie keeps input order).
    // Reflection [1, 1] beats the best and expansion [1.5, 1.5] beats that,
    // so it replaces the worst in place.
    assert_eq!(
        solution.history[1].vertices(),
        &[[1.0, 0.0], [0.0, 1.0], [1.5, 1.5]]
    );

    assert_eq!(&solution.evaluations[..5], &[8.0, 5.0, 5.0, 2.0, 0.5]);
    assert_eq!(solution.iters, solution.history.len());
}

#[test]
fn bounded_search_converges_to_feasible_corner() {
    let objective = Objective::new(paraboloid);
    let config = Config {
        bounds: Some(unit_box()),
        ..Config::default()
    };

    let solution = minimize_unobserved(&objective, &objective, unit_triangle(), &config)
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_abs_diff_eq!(solution.x[0], 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(solution.x[1], 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(solution.objective, 2.0, epsilon = 1e-2);

    // The unconstrained minimum is never accepted as best.
    let penalized = |x: &[f64; 2]| {
        if unit_box().contains(x) {
            paraboloid(x)
        } else {
            f64::INFINITY
        }
    };
    for simplex in &solution.history {
        let best = lowest(simplex, penalized);
        assert!(best.is_finite());
        assert!(best >= 2.0);
    }
    assert!(unit_box().contains(&solution.x));

    // Out-of-box candidates were evaluated and penalized.
    assert!(solution.evaluations.iter().any(|v| *v == f64::INFINITY));
}

#[test]
fn infeasible_vertex_ranks_last() {
    let objective = Objective::new(paraboloid);
    let config = Config {
        bounds: Some(unit_box()),
        max_iters: Some(1),
        ..Config::default()
    };

    // (2, 2) has the lowest raw objective but lies outside the box.
    let init = Init::Simplex(vec![[2.0, 2.0], [0.5, 0.5], [0.0, 1.0]]);

    let mut ranked = Vec::new();
    let observer = |event: &Event<'_, 2>| -> Option<Action> {
        ranked.push(event.simplex.clone());
        None
    };

    let solution = minimize(&objective, &objective, init, &config, observer).expect("should run");

    assert_eq!(
        solution.history[0].vertices(),
        &[[2.0, 2.0], [0.5, 0.5], [0.0, 1.0]]
    );
    assert_eq!(ranked[0].best(), &[0.5, 0.5]);
    assert_eq!(ranked[0].worst(), &[2.0, 2.0]);
    assert_eq!(&solution.evaluations[..3], &[f64::INFINITY, 4.5, 5.0]);
}

#[test]
fn infeasible_nan_objective_never_ranks_best() {
    // The square root of a negative coordinate is NaN, typically with its
    // sign bit set.
    let objective = Objective::new(|x: &[f64; 1]| x[0].sqrt());
    let config = Config {
        bounds: Some(Bounds::new([[0.0, 10.0]]).unwrap()),
        max_iters: Some(1),
        ..Config::default()
    };

    let mut ranked = Vec::new();
    let observer = |event: &Event<'_, 1>| -> Option<Action> {
        ranked.push(event.simplex.clone());
        None
    };

    let solution = minimize(
        &objective,
        &objective,
        Init::Simplex(vec![[4.0], [-1.0]]),
        &config,
        observer,
    )
    .expect("should run");

    assert_eq!(ranked[0].best(), &[4.0]);
    assert_eq!(ranked[0].worst(), &[-1.0]);

    // [-1] is penalized to +inf; the reflection [9] is kept.
    assert_eq!(&solution.evaluations[..], &[2.0, f64::INFINITY, 3.0]);
    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.x, [4.0]);
}

#[test]
fn bounded_sqrt_solve_stays_feasible() {
    let objective = Objective::new(|x: &[f64; 1]| x[0].sqrt());
    let bounds = Bounds::new([[0.0, 10.0]]).unwrap();
    let config = Config {
        bounds: Some(bounds),
        ..Config::default()
    };

    let solution = minimize_unobserved(
        &objective,
        &objective,
        Init::Simplex(vec![[4.0], [-1.0]]),
        &config,
    )
    .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert!(bounds.contains(&solution.x));
    assert!(solution.x[0] < 1e-3);
    assert!(solution.objective.is_finite());

    assert!(solution.evaluations.iter().all(|v| !v.is_nan()));
    assert!(solution.evaluations.contains(&f64::INFINITY));
}

#[test]
fn identical_starts_give_identical_histories() {
    let objective = Objective::new(rosenbrock);
    let init = || Init::Simplex(vec![[-1.2, 1.0], [-1.0, 1.0], [-1.2, 1.2]]);

    let first = minimize_unobserved(&objective, &objective, init(), &Config::default())
        .expect("should converge");
    let second = minimize_unobserved(&objective, &objective, init(), &Config::default())
        .expect("should converge");

    assert_eq!(first.history, second.history);
    assert_eq!(first.evaluations, second.evaluations);
    assert_eq!(first.x, second.x);
}

#[test]
fn seeded_random_start_is_reproducible_and_converges() {
    let objective = Objective::new(paraboloid);
    let config = Config {
        seed: Some(42),
        ..Config::default()
    };

    let first = minimize_unobserved(&objective, &objective, Init::Random, &config)
        .expect("should converge");
    let second = minimize_unobserved(&objective, &objective, Init::Random, &config)
        .expect("should converge");

    assert_eq!(first.history, second.history);

    for vertex in first.history[0].vertices() {
        assert!(vertex.iter().all(|c| (0.0..5.0).contains(c)));
    }

    assert_eq!(first.status, Status::Converged);
    assert_abs_diff_eq!(first.x[0], 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(first.x[1], 2.0, epsilon = 1e-2);
}

/// f(x, y) = (x - 2)² + (y - 2)², counting every call.
#[derive(Default)]
struct CountingParaboloid {
    calls: Cell<usize>,
}

impl Model for CountingParaboloid {
    type Input = [f64; 2];
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &[f64; 2]) -> Result<f64, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        Ok(paraboloid(input))
    }
}

/// Uses the solver variables as the model input and the output as objective.
struct Coordinates;

impl<const N: usize> OptimizationProblem<N> for Coordinates {
    type Input = [f64; N];
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; N]) -> Result<[f64; N], Self::Error> {
        Ok(*x)
    }

    fn objective(&self, _input: &[f64; N], output: &f64) -> Result<f64, Self::Error> {
        Ok(*output)
    }
}

#[test]
fn model_is_called_once_per_distinct_point() {
    let model = CountingParaboloid::default();

    let solution = minimize_unobserved(&model, &Coordinates, unit_triangle(), &Config::default())
        .expect("should converge");

    assert_eq!(model.calls.get(), solution.evaluations.len());

    // Each iteration ranks three vertices and tries at most two candidates,
    // so without the cache the count would grow by at least three per step.
    assert!(model.calls.get() < 3 * (solution.iters + 1));
}

#[test]
fn every_snapshot_has_n_plus_one_vertices() {
    let objective = Objective::new(|x: &[f64; 3]| {
        (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2) + (x[2] - 0.5).powi(2)
    });
    let init = Init::Simplex(vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);

    let solution =
        minimize_unobserved(&objective, &objective, init, &Config::default()).expect("converge");

    assert!(solution.history.iter().all(|s| s.vertices().len() == 4));
    assert_eq!(solution.simplex.vertices().len(), 4);

    assert_abs_diff_eq!(solution.x[0], 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(solution.x[1], -2.0, epsilon = 1e-3);
    assert_abs_diff_eq!(solution.x[2], 0.5, epsilon = 1e-3);
}

#[test]
fn best_objective_never_increases() {
    let objective = Objective::new(rosenbrock);
    let init = Init::Simplex(vec![[-1.2, 1.0], [-1.0, 1.0], [-1.2, 1.2]]);

    let solution =
        minimize_unobserved(&objective, &objective, init, &Config::default()).expect("converge");

    let best: Vec<f64> = solution
        .history
        .iter()
        .map(|s| lowest(s, rosenbrock))
        .collect();
    assert!(is_non_increasing(&best));

    assert_eq!(solution.status, Status::Converged);
    assert_abs_diff_eq!(solution.x[0], 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(solution.x[1], 1.0, epsilon = 1e-3);
}

#[test]
fn minimizes_single_variable() {
    let objective = Objective::new(|x: &[f64; 1]| (x[0] - 3.0).powi(2));

    let solution = minimize_unobserved(
        &objective,
        &objective,
        Init::Simplex(vec![[0.0], [1.0]]),
        &Config::default(),
    )
    .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_abs_diff_eq!(solution.x[0], 3.0, epsilon = 1e-3);
}

#[test]
fn spread_convergence_stops_on_small_objective() {
    let objective = Objective::new(paraboloid);
    let config = Config {
        convergence: Convergence::Spread { tol: 1e-3 },
        ..Config::default()
    };

    let solution = minimize_unobserved(&objective, &objective, unit_triangle(), &config)
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.objective < 1e-3);
}

#[test]
fn iteration_ceiling_reports_max_iters() {
    let objective = Objective::new(rosenbrock);
    let config = Config {
        max_iters: Some(3),
        ..Config::default()
    };

    let solution =
        minimize_unobserved(&objective, &objective, unit_triangle(), &config).expect("should run");

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 3);
    assert_eq!(solution.history.len(), 3);
}

#[test]
fn observer_can_stop_early() {
    let objective = Objective::new(paraboloid);

    let observer = |event: &Event<'_, 2>| {
        if event.iter == 2 {
            Some(Action::StopEarly)
        } else {
            None
        }
    };

    let solution = minimize(
        &objective,
        &objective,
        unit_triangle(),
        &Config::default(),
        observer,
    )
    .expect("should stop cleanly");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 2);

    // The second iteration ranked the simplex but never applied its step.
    assert_eq!(
        solution.simplex.vertices(),
        &[[1.5, 1.5], [1.0, 0.0], [0.0, 1.0]]
    );
    assert_eq!(solution.x, [1.5, 1.5]);
    assert_relative_eq!(solution.objective, 0.5);
}

#[test]
fn observer_sees_each_recorded_iteration() {
    let objective = Objective::new(paraboloid);

    let mut seen: Vec<(usize, Step, Simplex<2>, f64)> = Vec::new();
    let observer = |event: &Event<'_, 2>| -> Option<Action> {
        seen.push((
            event.iter,
            event.step,
            event.simplex.clone(),
            event.best_objective(),
        ));
        None
    };

    let solution = minimize(
        &objective,
        &objective,
        unit_triangle(),
        &Config::default(),
        observer,
    )
    .expect("should converge");

    assert_eq!(seen.len(), solution.iters);
    assert_eq!(seen[0].1, Step::Expand);

    for (i, (iter, _, simplex, best)) in seen.iter().enumerate() {
        assert_eq!(*iter, i + 1);

        // Same vertices as the recorded entry, ranked best first.
        let recorded = &solution.history[i];
        assert!(simplex.vertices().iter().all(|v| recorded.vertices().contains(v)));
        assert_relative_eq!(*best, paraboloid(simplex.best()));
        assert_relative_eq!(*best, lowest(recorded, paraboloid));
    }

    let objectives: Vec<f64> = seen.iter().map(|(.., best)| *best).collect();
    assert!(is_non_increasing(&objectives));
}

#[test]
fn invalid_config_fails_before_any_evaluation() {
    let model = CountingParaboloid::default();
    let config = Config {
        coefficients: Coefficients {
            shrink: 0.0,
            ..Coefficients::default()
        },
        ..Config::default()
    };

    let result = minimize_unobserved(&model, &Coordinates, unit_triangle(), &config);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::Coefficient { name: "shrink", .. }))
    ));
    assert_eq!(model.calls.get(), 0);
}

#[test]
fn mismatched_starting_simplex_fails_before_any_evaluation() {
    let model = CountingParaboloid::default();
    let init = Init::Simplex(vec![[0.0, 0.0], [1.0, 0.0]]);

    let result = minimize_unobserved(&model, &Coordinates, init, &Config::default());

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::VertexCount {
            expected: 3,
            got: 2
        }))
    ));
    assert_eq!(model.calls.get(), 0);
}

#[test]
fn zero_dimension_is_rejected() {
    let objective = Objective::new(|_: &[f64; 0]| 0.0);

    let result = minimize_unobserved(
        &objective,
        &objective,
        Init::Simplex(vec![[]]),
        &Config::default(),
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ZeroDimension))
    ));
}

/// f(x) = (x - 5)², failing for x above a threshold.
struct ThresholdModel {
    threshold: f64,
}

#[derive(Debug, Clone, Error)]
#[error("model failed at x={x} (threshold={threshold})")]
struct ThresholdError {
    x: f64,
    threshold: f64,
}

impl Model for ThresholdModel {
    type Input = [f64; 1];
    type Output = f64;
    type Error = ThresholdError;

    fn call(&self, input: &[f64; 1]) -> Result<f64, Self::Error> {
        let x = input[0];
        if x > self.threshold {
            Err(ThresholdError {
                x,
                threshold: self.threshold,
            })
        } else {
            Ok((x - 5.0).powi(2))
        }
    }
}

#[test]
fn model_failure_aborts_the_solve() {
    // Iteration 1 expands from [0, 1] to [1, 3]; iteration 2 reflects to 5,
    // which is above the threshold.
    let model = ThresholdModel { threshold: 3.0 };

    let result = minimize_unobserved(
        &model,
        &Coordinates,
        Init::Simplex(vec![[0.0], [1.0]]),
        &Config::default(),
    );

    let Err(Error::Model(source)) = result else {
        panic!("expected a model error");
    };
    let failure = source
        .downcast_ref::<ThresholdError>()
        .expect("original error is preserved");
    assert_relative_eq!(failure.x, 5.0);
}

#[test]
fn into_history_returns_snapshots_and_log() {
    let objective = Objective::new(paraboloid);

    let solution = minimize_unobserved(&objective, &objective, unit_triangle(), &Config::default())
        .expect("should converge");
    let iters = solution.iters;

    let (history, log) = solution.into_history();

    assert_eq!(history.len(), iters);
    assert_eq!(log[0], 8.0);
}
