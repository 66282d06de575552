use thiserror::Error;

/// Errors that can occur when evaluating a material model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MaterialError {
    /// The deformation gradient inverts or collapses the material.
    #[error("deformation gradient has non-positive jacobian {jacobian}")]
    NonPositiveJacobian { jacobian: f64 },

    /// The parameter vector has the wrong length for the model.
    #[error("{model} expects {expected} parameters, found {found}")]
    InvalidParameterCount {
        model: &'static str,
        expected: &'static str,
        found: usize,
    },
}
