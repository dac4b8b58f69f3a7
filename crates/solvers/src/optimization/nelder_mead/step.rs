use std::fmt;

use super::{Coefficients, Simplex};

/// The transformation applied to the simplex in one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// The worst vertex was replaced by its reflection through the centroid.
    Reflect,

    /// The worst vertex was replaced by the expanded reflection.
    Expand,

    /// The worst vertex was replaced by a point between it and the centroid.
    Contract,

    /// Every vertex but the best moved toward the best.
    Shrink,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reflect => "reflect",
            Self::Expand => "expand",
            Self::Contract => "contract",
            Self::Shrink => "shrink",
        };
        f.write_str(name)
    }
}

/// A step together with the vertex it introduces, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Move<const N: usize> {
    Replace { step: Step, vertex: [f64; N] },
    Shrink,
}

impl<const N: usize> Move<N> {
    pub(super) fn step(&self) -> Step {
        match self {
            Self::Replace { step, .. } => *step,
            Self::Shrink => Step::Shrink,
        }
    }

    /// Applies the move to the simplex it was planned from.
    pub(super) fn apply(self, simplex: &mut Simplex<N>, coefficients: &Coefficients) {
        match self {
            Self::Replace { vertex, .. } => simplex.replace_worst(vertex),
            Self::Shrink => simplex.shrink(coefficients.shrink),
        }
    }
}

/// Decides this iteration's move for a ranked simplex.
///
/// `objectives` must be the ranked objectives of `simplex`. Candidate
/// points are evaluated through `objective` in the order reflect, expand,
/// contract, and only as far as the decision requires:
///
/// 1. Keep the reflection if it is no better than the best but strictly
///    better than the worst.
/// 2. If the reflection beats the best, try expanding it and keep
///    whichever of the two is lower.
/// 3. Otherwise contract toward the centroid and keep the contraction if
///    it beats the worst.
/// 4. Otherwise shrink.
pub(super) fn plan<const N: usize, E>(
    simplex: &Simplex<N>,
    objectives: &[f64],
    coefficients: &Coefficients,
    mut objective: impl FnMut(&[f64; N]) -> Result<f64, E>,
) -> Result<Move<N>, E> {
    let f_best = objectives[0];
    let f_worst = objectives[N];

    let centroid = simplex.centroid();
    let reflected = simplex.reflected(&centroid, coefficients.reflection);
    let f_reflected = objective(&reflected)?;

    if f_best <= f_reflected && f_reflected < f_worst {
        return Ok(Move::Replace {
            step: Step::Reflect,
            vertex: reflected,
        });
    }

    if f_reflected < f_best {
        let expanded = Simplex::expanded(&centroid, &reflected, coefficients.expansion);
        let f_expanded = objective(&expanded)?;
        return Ok(if f_expanded < f_reflected {
            Move::Replace {
                step: Step::Expand,
                vertex: expanded,
            }
        } else {
            Move::Replace {
                step: Step::Reflect,
                vertex: reflected,
            }
        });
    }

    let contracted = simplex.contracted(&centroid, coefficients.contraction);
    if objective(&contracted)? < f_worst {
        return Ok(Move::Replace {
            step: Step::Contract,
            vertex: contracted,
        });
    }

    Ok(Move::Shrink)
}
