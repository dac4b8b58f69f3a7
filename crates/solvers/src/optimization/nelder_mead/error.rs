use std::error::Error as StdError;

use thiserror::Error;

use crate::optimization::EvalError;

use super::ConfigError;

/// Errors that can occur during a Nelder-Mead solve.
///
/// Configuration errors are raised before the first evaluation. Model and
/// problem errors abort the solve and are passed through boxed but
/// otherwise unchanged. Each variant prints its cause inline rather than
/// exposing it as a `source`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    Config(ConfigError),

    #[error("model error: {0}")]
    Model(Box<dyn StdError + Send + Sync>),

    #[error("problem error: {0}")]
    Problem(Box<dyn StdError + Send + Sync>),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model(e) => Self::Model(Box::new(e)),
            EvalError::Problem(e) => Self::Problem(Box::new(e)),
        }
    }
}
