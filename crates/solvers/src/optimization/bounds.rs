use thiserror::Error;

/// Per-dimension closed intervals `[lower, upper]` for solver variables.
///
/// Points with any coordinate outside its interval are infeasible. The
/// [`MemoizedEvaluator`](super::MemoizedEvaluator) penalizes them with
/// `+∞` so they always rank behind every feasible point.
///
/// Infinite limits are allowed and give one-sided bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const N: usize> {
    limits: [[f64; 2]; N],
}

/// Errors that can occur when constructing [`Bounds`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    #[error("bound {index} has a NaN limit")]
    NanLimit { index: usize },

    #[error("bound {index} is inverted: lower {lower} > upper {upper}")]
    Inverted { index: usize, lower: f64, upper: f64 },
}

impl<const N: usize> Bounds<N> {
    /// Creates bounds from `[lower, upper]` pairs, one per dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is NaN or if `lower > upper`.
    pub fn new(limits: [[f64; 2]; N]) -> Result<Self, BoundsError> {
        for (index, &[lower, upper]) in limits.iter().enumerate() {
            if lower.is_nan() || upper.is_nan() {
                return Err(BoundsError::NanLimit { index });
            }
            if lower > upper {
                return Err(BoundsError::Inverted {
                    index,
                    lower,
                    upper,
                });
            }
        }
        Ok(Self { limits })
    }

    /// Returns the `[lower, upper]` pair for each dimension.
    #[must_use]
    pub fn limits(&self) -> &[[f64; 2]; N] {
        &self.limits
    }

    /// Returns `true` if every coordinate of `x` lies within its interval.
    ///
    /// Interval endpoints are feasible. A NaN coordinate is never contained.
    #[must_use]
    pub fn contains(&self, x: &[f64; N]) -> bool {
        x.iter()
            .zip(&self.limits)
            .all(|(value, [lower, upper])| (*lower..=*upper).contains(value))
    }
}
