use std::error::Error as StdError;

use crate::optimization::{DomainError, EvalError};

/// Errors that can occur during a Nelder–Mead search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(Box<dyn StdError + Send + Sync>),

    #[error("problem error: {0}")]
    Problem(Box<dyn StdError + Send + Sync>),

    #[error("invalid initial guess: {0}")]
    InvalidInitialGuess(#[source] DomainError),

    #[error("no evaluation succeeded before the search stopped")]
    NoSuccessfulEvaluation,
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
