use crate::{Tensor, tensor};

use super::volumetric;

/// `σ = μ/(J·λch)·L⁻¹(λch/λL)/L⁻¹(1/λL)·dev(b̄) + κ(J − 1)·I`
///
/// with chain stretch `λch = sqrt(tr(b̄)/3)`.
pub(super) fn stress(f: &Tensor, jacobian: f64, params: &[f64]) -> Tensor {
    let (mu, lock, kappa) = (params[0], params[1], params[2]);
    let b_bar = tensor::left_cauchy_green(f) * jacobian.powf(-2.0 / 3.0);
    let chain = (b_bar.trace() / 3.0).sqrt();

    let scale = mu / (jacobian * chain) * inverse_langevin(chain / lock)
        / inverse_langevin(1.0 / lock);
    tensor::deviatoric(&b_bar) * scale + volumetric(kappa, jacobian)
}

/// Bergström's approximation of the inverse Langevin function.
///
/// The argument is clamped to `[−1 + ε, 1 − ε]` with `ε = f64::EPSILON`,
/// so the result stays finite at full chain extension.
pub(crate) fn inverse_langevin(x: f64) -> f64 {
    let x = x.clamp(-1.0 + f64::EPSILON, 1.0 - f64::EPSILON);

    if x.abs() < 0.839 {
        1.31435 * (1.59 * x).tan() + 0.911_249 * x
    } else {
        1.0 / (x.signum() - x)
    }
}
