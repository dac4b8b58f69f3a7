use amoeba_core::Observer;

use crate::traits::{HasObjective, HasSimplex};

/// The best vertex and objective seen at one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint<const N: usize> {
    /// Iteration counter, starting at 1.
    pub iter: usize,
    /// Best vertex of the simplex.
    pub best: [f64; N],
    /// Objective of the best vertex.
    pub objective: f64,
}

/// Records the progress of a simplex solve, one point per event.
///
/// The recorded objectives are the data behind an objective-vs-iteration
/// plot. Pass `&mut trace` as the observer to keep access to the data after
/// the solve returns.
///
/// # Example
///
/// ```rust
/// use amoeba_core::Objective;
/// use amoeba_observers::Trace;
/// use amoeba_solvers::optimization::nelder_mead::{self, Config, Init};
///
/// let objective = Objective::new(|x: &[f64; 2]| x[0] * x[0] + x[1] * x[1]);
/// let init = Init::Simplex(vec![[1.0, 1.0], [2.0, 1.0], [1.0, 2.0]]);
///
/// let mut trace = Trace::<2>::new();
/// let solution =
///     nelder_mead::minimize(&objective, &objective, init, &Config::default(), &mut trace)
///         .unwrap();
///
/// assert_eq!(trace.points().len(), solution.iters);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trace<const N: usize> {
    points: Vec<TracePoint<N>>,
}

impl<const N: usize> Trace<N> {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Returns the recorded points in iteration order.
    #[must_use]
    pub fn points(&self) -> &[TracePoint<N>] {
        &self.points
    }

    /// Returns `(iteration, objective)` pairs ready for plotting.
    pub fn objectives(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.points.iter().map(|point| (point.iter, point.objective))
    }

    /// Consumes the trace and returns the recorded points.
    #[must_use]
    pub fn into_points(self) -> Vec<TracePoint<N>> {
        self.points
    }
}

impl<const N: usize, E, A> Observer<E, A> for Trace<N>
where
    E: HasObjective + HasSimplex<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.points.push(TracePoint {
            iter: self.points.len() + 1,
            best: *event.simplex().best(),
            objective: event.objective(),
        });
        None
    }
}

impl<const N: usize, E, A> Observer<E, A> for &mut Trace<N>
where
    E: HasObjective + HasSimplex<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
