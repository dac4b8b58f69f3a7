use std::convert::Infallible;

use crate::{Model, OptimizationProblem};

/// A plain objective function of `N` coordinates.
///
/// `Objective` is both the [`Model`] and the [`OptimizationProblem`]: the
/// model input is the coordinate array itself and the model output is the
/// objective value. Use it when the function being minimized has no richer
/// input or output types worth capturing.
///
/// ```
/// use amoeba_core::{Model, Objective};
///
/// let paraboloid = Objective::new(|[x, y]: &[f64; 2]| (x - 2.0).powi(2) + (y - 2.0).powi(2));
/// assert_eq!(paraboloid.call(&[2.0, 3.0]), Ok(1.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Objective<F, const N: usize> {
    function: F,
}

impl<F, const N: usize> Objective<F, N>
where
    F: Fn(&[f64; N]) -> f64,
{
    /// Wraps a function of `N` coordinates.
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F, const N: usize> Model for Objective<F, N>
where
    F: Fn(&[f64; N]) -> f64,
{
    type Input = [f64; N];
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &[f64; N]) -> Result<f64, Self::Error> {
        Ok((self.function)(input))
    }
}

impl<F, const N: usize> OptimizationProblem<N> for Objective<F, N>
where
    F: Fn(&[f64; N]) -> f64,
{
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
