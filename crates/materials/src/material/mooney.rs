use crate::{Tensor, tensor};

use super::volumetric;

/// Five-term two-invariant polynomial.
///
/// `Ψ = C10(Ī1−3) + C01(Ī2−3) + C11(Ī1−3)(Ī2−3) + C20(Ī1−3)² + C30(Ī1−3)³`
pub(super) fn stress(f: &Tensor, jacobian: f64, params: &[f64]) -> Tensor {
    let (c10, c01, c11, c20, c30, kappa) = (
        params[0], params[1], params[2], params[3], params[4], params[5],
    );
    let b_bar = tensor::left_cauchy_green(f) * jacobian.powf(-2.0 / 3.0);
    let b_bar2 = b_bar * b_bar;
    let tensor::Invariants { i1, i2, .. } = tensor::invariants(&b_bar);

    let dpsi_di1 =
        c10 + c11 * (i2 - 3.0) + 2.0 * c20 * (i1 - 3.0) + 3.0 * c30 * (i1 - 3.0).powi(2);
    let dpsi_di2 = c01 + c11 * (i1 - 3.0);

    let deviatoric = b_bar * (2.0 / jacobian * (dpsi_di1 + dpsi_di2 * i1))
        - b_bar2 * (2.0 / jacobian * dpsi_di2)
        - Tensor::identity() * (2.0 / (3.0 * jacobian) * (i1 * dpsi_di1 + 2.0 * i2 * dpsi_di2));

    deviatoric + volumetric(kappa, jacobian)
}
