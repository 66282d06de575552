use crate::{Tensor, tensor};

use super::volumetric;

/// `σ = μ/J·dev(b̄) + κ(J − 1)·I`
pub(super) fn stress(f: &Tensor, jacobian: f64, params: &[f64]) -> Tensor {
    let (mu, kappa) = (params[0], params[1]);
    let b_bar = tensor::left_cauchy_green(f) * jacobian.powf(-2.0 / 3.0);

    tensor::deviatoric(&b_bar) * (mu / jacobian) + volumetric(kappa, jacobian)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use crate::{Material, Tensor};

    #[test]
    fn compressible_stretch() {
        let f = Tensor::from_diagonal(&Vector3::new(1.5, 0.9, 0.8));
        let stress = Material::NeoHookean.stress(&f, &[1.0, 100.0]).unwrap();

        assert_relative_eq!(stress[(0, 0)], 8.894_277_544, max_relative = 1e-8);
        assert_relative_eq!(stress[(1, 1)], 7.627_628_695, max_relative = 1e-8);
        assert_relative_eq!(stress[(2, 2)], 7.478_093_761, max_relative = 1e-8);
    }

    #[test]
    fn incompressible_uniaxial_matches_closed_form() {
        // σ11 − σ22 = μ(λ² − 1/λ) when J = 1.
        let l: f64 = 1.8;
        let f = Tensor::from_diagonal(&Vector3::new(l, l.powf(-0.5), l.powf(-0.5)));
        let stress = Material::NeoHookean.stress(&f, &[0.6, 0.0]).unwrap();

        assert_relative_eq!(
            stress[(0, 0)] - stress[(1, 1)],
            0.6 * (l * l - 1.0 / l),
            max_relative = 1e-12
        );
    }
}
