use thiserror::Error;

use crate::optimization::Bounds;

use super::Simplex;

/// Coefficients of the four simplex transformations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Reflection coefficient α.
    ///
    /// The reflected point is `worst + 2α (centroid - worst)`, so the
    /// default `α = 1` is the textbook unit reflection through the centroid.
    pub reflection: f64,

    /// Expansion coefficient γ.
    pub expansion: f64,

    /// Contraction coefficient ρ.
    pub contraction: f64,

    /// Shrink coefficient σ.
    pub shrink: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
        }
    }
}

/// Termination test applied to the ranked simplex at the start of each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Convergence {
    /// Converged when the Euclidean distance between the best and
    /// second-best vertex falls below `tol`.
    VertexDistance { tol: f64 },

    /// Converged when the best objective falls below `tol`, or when every
    /// vertex lies within `tol / 2` of the vertex mean in every dimension.
    Spread { tol: f64 },
}

impl Default for Convergence {
    fn default() -> Self {
        Self::VertexDistance { tol: 1e-4 }
    }
}

impl Convergence {
    /// Returns the tolerance of either policy.
    #[must_use]
    pub fn tol(&self) -> f64 {
        match self {
            Self::VertexDistance { tol } | Self::Spread { tol } => *tol,
        }
    }

    /// Tests a ranked simplex and its objectives for convergence.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn is_converged<const N: usize>(
        &self,
        simplex: &Simplex<N>,
        objectives: &[f64],
    ) -> bool {
        let vertices = simplex.vertices();
        match *self {
            Self::VertexDistance { tol } => {
                let distance = vertices[0]
                    .iter()
                    .zip(&vertices[1])
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
                    .sqrt();
                distance < tol
            }
            Self::Spread { tol } => {
                if objectives[0] < tol {
                    return true;
                }
                let count = vertices.len() as f64;
                (0..N).all(|j| {
                    let mean = vertices.iter().map(|v| v[j]).sum::<f64>() / count;
                    vertices.iter().all(|v| (v[j] - mean).abs() < 0.5 * tol)
                })
            }
        }
    }
}

/// Configuration for the Nelder-Mead solver.
///
/// Every field has a default; [`Config::validate`] is run by the solver
/// before any evaluation, so an invalid config fails without touching the
/// model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config<const N: usize> {
    pub coefficients: Coefficients,

    pub convergence: Convergence,

    /// Per-dimension bounds; points outside are penalized with `+∞`.
    pub bounds: Option<Bounds<N>>,

    /// Optional iteration ceiling.
    ///
    /// `None` (the default) never stops for iteration count: an objective
    /// that never meets the convergence test keeps the solver running.
    pub max_iters: Option<usize>,

    /// Upper end of `[0, init_scale)`, the range random starting vertices
    /// are drawn from.
    pub init_scale: f64,

    /// Seed for random starting vertices; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl<const N: usize> Default for Config<N> {
    fn default() -> Self {
        Self {
            coefficients: Coefficients::default(),
            convergence: Convergence::default(),
            bounds: None,
            max_iters: None,
            init_scale: 5.0,
            seed: None,
        }
    }
}

/// Errors that can occur when validating a Nelder-Mead configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("problem dimension must be at least 1")]
    ZeroDimension,

    #[error("{name} coefficient must be finite and positive, got {value}")]
    Coefficient { name: &'static str, value: f64 },

    #[error("convergence tolerance must be finite and positive, got {value}")]
    Tolerance { value: f64 },

    #[error("init_scale must be finite and positive, got {value}")]
    InitScale { value: f64 },

    #[error("starting simplex needs {expected} vertices, got {got}")]
    VertexCount { expected: usize, got: usize },

    #[error("starting vertex {vertex} has non-finite coordinate {coordinate}")]
    NonFiniteVertex { vertex: usize, coordinate: usize },
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl<const N: usize> Config<N> {
    /// Validates the dimension, coefficients, tolerance, and init scale.
    ///
    /// # Errors
    ///
    /// Returns an error if `N` is zero or any coefficient, the convergence
    /// tolerance, or `init_scale` is not finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if N == 0 {
            return Err(ConfigError::ZeroDimension);
        }

        let Coefficients {
            reflection,
            expansion,
            contraction,
            shrink,
        } = self.coefficients;
        for (name, value) in [
            ("reflection", reflection),
            ("expansion", expansion),
            ("contraction", contraction),
            ("shrink", shrink),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::Coefficient { name, value });
            }
        }

        let tol = self.convergence.tol();
        if !is_positive(tol) {
            return Err(ConfigError::Tolerance { value: tol });
        }

        if !is_positive(self.init_scale) {
            return Err(ConfigError::InitScale {
                value: self.init_scale,
            });
        }

        Ok(())
    }
}
