use crate::{Tensor, tensor};

use super::volumetric;

/// `σ = 2/J·(C10 + 2C20(Ī1 − 3) + 3C30(Ī1 − 3)²)·dev(b̄) + κ(J − 1)·I`
pub(super) fn stress(f: &Tensor, jacobian: f64, params: &[f64]) -> Tensor {
    let (c10, c20, c30, kappa) = (params[0], params[1], params[2], params[3]);
    let b_bar = tensor::left_cauchy_green(f) * jacobian.powf(-2.0 / 3.0);
    let i1 = b_bar.trace() - 3.0;

    let dpsi_di1 = c10 + 2.0 * c20 * i1 + 3.0 * c30 * i1 * i1;
    tensor::deviatoric(&b_bar) * (2.0 / jacobian * dpsi_di1) + volumetric(kappa, jacobian)
}
