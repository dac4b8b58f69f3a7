use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Config, ConfigError, Simplex};

/// How the solver builds its starting simplex.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Init<const N: usize> {
    /// Draw every coordinate of `N + 1` vertices uniformly from
    /// `[0, init_scale)`, using [`Config::seed`] when set.
    #[default]
    Random,

    /// Use these vertices verbatim. There must be exactly `N + 1` of them.
    Simplex(Vec<[f64; N]>),
}

impl<const N: usize> Init<N> {
    /// Builds the starting simplex, validating supplied vertices.
    pub(super) fn build(self, config: &Config<N>) -> Result<Simplex<N>, ConfigError> {
        match self {
            Self::Random => {
                let mut rng = match config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_rng(&mut rand::rng()),
                };
                let scale = config.init_scale;
                let vertices = (0..=N)
                    .map(|_| std::array::from_fn(|_| rng.random::<f64>() * scale))
                    .collect();
                Ok(Simplex::new(vertices))
            }
            Self::Simplex(vertices) => {
                if vertices.len() != N + 1 {
                    return Err(ConfigError::VertexCount {
                        expected: N + 1,
                        got: vertices.len(),
                    });
                }
                for (vertex, point) in vertices.iter().enumerate() {
                    if let Some(coordinate) = point.iter().position(|c| !c.is_finite()) {
                        return Err(ConfigError::NonFiniteVertex { vertex, coordinate });
                    }
                }
                Ok(Simplex::new(vertices))
            }
        }
    }
}
