use nalgebra::Vector3;

use crate::{MaterialError, Tensor, tensor};

/// Splits `[μ1..μN, α1..αN, κ]` into its parts.
fn split(params: &[f64]) -> (&[f64], &[f64], f64) {
    let terms = (params.len() - 1) / 2;
    (
        &params[..terms],
        &params[terms..2 * terms],
        params[params.len() - 1],
    )
}

/// Deviatoric principal stresses `Σn cn·(λ̄i^αn − mean_j λ̄j^αn)`.
fn principal_deviatoric(
    stretches: &Vector3<f64>,
    mu: &[f64],
    alpha: &[f64],
    coefficient: impl Fn(f64, f64) -> f64,
) -> Vector3<f64> {
    mu.iter()
        .zip(alpha)
        .fold(Vector3::zeros(), |acc, (&mu, &alpha)| {
            let powered = stretches.map(|s| s.powf(alpha));
            let mean = powered.sum() / 3.0;
            acc + powered.add_scalar(-mean) * coefficient(mu, alpha)
        })
}

/// `σi = κ(J − 1) + Σn 2μn/(J·αn)·(λ̄i^αn − mean_j λ̄j^αn)`
pub(super) fn stress(f: &Tensor, jacobian: f64, params: &[f64]) -> Result<Tensor, MaterialError> {
    let (mu, alpha, kappa) = split(params);
    let principal = tensor::principal_stretches(f)?;

    let deviatoric = principal_deviatoric(&principal.stretches, mu, alpha, |mu, alpha| {
        2.0 * mu / (jacobian * alpha)
    });
    let values = deviatoric.add_scalar(kappa * (jacobian - 1.0));
    Ok(principal.reconstruct(&values))
}

/// `σi = 3κ(J^(1/3) − 1)J^(-2/3) + Σn μn/J·(λ̄i^αn − mean_j λ̄j^αn)`
pub(super) fn stress_marc(
    f: &Tensor,
    jacobian: f64,
    params: &[f64],
) -> Result<Tensor, MaterialError> {
    let (mu, alpha, kappa) = split(params);
    let principal = tensor::principal_stretches(f)?;

    let deviatoric =
        principal_deviatoric(&principal.stretches, mu, alpha, |mu, _| mu / jacobian);
    let pressure = 3.0 * kappa * (jacobian.cbrt() - 1.0) * jacobian.powf(-2.0 / 3.0);
    Ok(principal.reconstruct(&deviatoric.add_scalar(pressure)))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Vector3};

    use crate::{Material, Tensor};

    const PARAMS: [f64; 5] = [1.0, 2.0, 1.1, 0.4, 100.0];

    fn stretch() -> Tensor {
        Tensor::from_diagonal(&Vector3::new(1.5, 0.9, 0.8))
    }

    #[test]
    fn compressible_stretch() {
        let stress = Material::Ogden.stress(&stretch(), &PARAMS).unwrap();

        assert_relative_eq!(stress[(0, 0)], 10.254_461_800, max_relative = 1e-8);
        assert_relative_eq!(stress[(1, 1)], 7.163_510_073, max_relative = 1e-8);
        assert_relative_eq!(stress[(2, 2)], 6.582_028_128, max_relative = 1e-8);
        assert_relative_eq!(stress[(0, 1)], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn marc_convention_compressible_stretch() {
        let stress = Material::OgdenMarc.stress(&stretch(), &PARAMS).unwrap();

        assert_relative_eq!(stress[(0, 0)], 8.133_777_237, max_relative = 1e-8);
        assert_relative_eq!(stress[(1, 1)], 7.130_929_824, max_relative = 1e-8);
        assert_relative_eq!(stress[(2, 2)], 6.952_641_065, max_relative = 1e-8);
    }

    #[test]
    fn single_quadratic_term_is_neo_hookean() {
        let f = Tensor::new(1.3, 0.2, 0.0, 0.1, 0.9, 0.05, 0.0, -0.1, 1.1);
        let ogden = Material::Ogden.stress(&f, &[0.7, 2.0, 30.0]).unwrap();
        let neo = Material::NeoHookean.stress(&f, &[0.7, 30.0]).unwrap();

        assert_relative_eq!(ogden, neo, epsilon = 1e-10);
    }

    #[test]
    fn stress_rotates_with_the_body() {
        let rotation = *Rotation3::from_euler_angles(0.4, -0.3, 0.2).matrix();
        for material in [Material::Ogden, Material::OgdenMarc] {
            let reference = material.stress(&stretch(), &PARAMS).unwrap();
            let rotated = material.stress(&(rotation * stretch()), &PARAMS).unwrap();

            assert_relative_eq!(
                rotated,
                rotation * reference * rotation.transpose(),
                epsilon = 1e-10
            );
        }
    }
}
