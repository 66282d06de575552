//! Tensor kinematics shared by every material model.
//!
//! All functions work on the 3×3 deformation gradient `F` or tensors
//! derived from it. Stretches and eigenbases are taken from the spatial
//! (left) Cauchy–Green tensor, and principal quantities are rotated back as
//! `Q·D·Qᵀ`.

use nalgebra::{Matrix3, SymmetricEigen, Vector3};

use crate::MaterialError;

/// A 3×3 second-order tensor.
pub type Tensor = Matrix3<f64>;

/// Returns the volume ratio `J = det(F)`.
#[must_use]
pub fn jacobian(f: &Tensor) -> f64 {
    f.determinant()
}

/// Returns `J` if the deformation gradient is admissible.
///
/// # Errors
///
/// Returns [`MaterialError::NonPositiveJacobian`] if `J` is not a finite
/// positive number.
pub fn validate(f: &Tensor) -> Result<f64, MaterialError> {
    let jacobian = jacobian(f);
    if jacobian.is_finite() && jacobian > 0.0 {
        Ok(jacobian)
    } else {
        Err(MaterialError::NonPositiveJacobian { jacobian })
    }
}

/// Returns the volume-preserving part `F̄ = J^(-1/3)·F`.
///
/// # Errors
///
/// Returns an error if `F` is not admissible.
pub fn isochoric(f: &Tensor) -> Result<Tensor, MaterialError> {
    let jacobian = validate(f)?;
    Ok(f * jacobian.powf(-1.0 / 3.0))
}

/// Returns the left Cauchy–Green tensor `b = F·Fᵀ`.
#[must_use]
pub fn left_cauchy_green(f: &Tensor) -> Tensor {
    f * f.transpose()
}

/// Returns the right Cauchy–Green tensor `C = Fᵀ·F`.
#[must_use]
pub fn right_cauchy_green(f: &Tensor) -> Tensor {
    f.transpose() * f
}

/// The three principal invariants of a symmetric tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invariants {
    pub i1: f64,
    pub i2: f64,
    pub i3: f64,
}

/// Returns the principal invariants of `b`.
#[must_use]
pub fn invariants(b: &Tensor) -> Invariants {
    let i1 = b.trace();
    Invariants {
        i1,
        i2: 0.5 * (i1 * i1 - (b * b).trace()),
        i3: b.determinant(),
    }
}

/// Returns the deviatoric part `A − tr(A)/3·I`.
#[must_use]
pub fn deviatoric(a: &Tensor) -> Tensor {
    a - Tensor::identity() * (a.trace() / 3.0)
}

/// Principal isochoric stretches and the spatial directions they act along.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// Stretches `λ̄i`, the square roots of the eigenvalues of `b̄`.
    pub stretches: Vector3<f64>,

    /// Eigenvectors of `b̄`, one per column, paired with `stretches`.
    pub directions: Matrix3<f64>,
}

impl Principal {
    /// Returns `Q·diag(values)·Qᵀ`, mapping principal values onto the
    /// spatial frame.
    #[must_use]
    pub fn reconstruct(&self, values: &Vector3<f64>) -> Tensor {
        self.directions * Matrix3::from_diagonal(values) * self.directions.transpose()
    }
}

/// Returns the principal stretches of the isochoric left Cauchy–Green
/// tensor `b̄ = J^(-2/3)·F·Fᵀ`.
///
/// # Errors
///
/// Returns an error if `F` is not admissible.
pub fn principal_stretches(f: &Tensor) -> Result<Principal, MaterialError> {
    let jacobian = validate(f)?;
    let b_bar = left_cauchy_green(f) * jacobian.powf(-2.0 / 3.0);
    let SymmetricEigen {
        eigenvectors,
        eigenvalues,
    } = b_bar.symmetric_eigen();

    Ok(Principal {
        // b̄ is positive definite; clamp round-off below zero.
        stretches: eigenvalues.map(|value| value.max(0.0).sqrt()),
        directions: eigenvectors,
    })
}
