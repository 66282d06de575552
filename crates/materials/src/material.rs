//! The hyperelastic material models.
//!
//! Every model maps a deformation gradient `F` and a parameter vector to the
//! Cauchy stress `σ`. The deviatoric response is computed from the
//! isochoric kinematics and divided by `J`. The volumetric response depends
//! only on `J` and vanishes at `J = 1`.
//!
//! | model | parameters |
//! |---|---|
//! | [`Material::NeoHookean`] | `[μ, κ]` |
//! | [`Material::Yeoh`] | `[C10, C20, C30, κ]` |
//! | [`Material::Mooney5`] | `[C10, C01, C11, C20, C30, κ]` |
//! | [`Material::EightChain`] | `[μ, λL, κ]` |
//! | [`Material::Ogden`], [`Material::OgdenMarc`] | `[μ1..μN, α1..αN, κ]` |

mod eight_chain;
mod mooney;
mod neo_hookean;
mod ogden;
mod yeoh;

use std::fmt;

use hyperfit_core::Model;

use crate::{MaterialError, Tensor, tensor};

/// A hyperelastic material model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    /// Neo-Hookean, `[μ, κ]`.
    NeoHookean,

    /// Yeoh third-order reduced polynomial, `[C10, C20, C30, κ]`.
    Yeoh,

    /// Five-term Mooney–Rivlin polynomial, `[C10, C01, C11, C20, C30, κ]`.
    Mooney5,

    /// Arruda–Boyce eight-chain, `[μ, λL, κ]`.
    EightChain,

    /// Ogden, `[μ1..μN, α1..αN, κ]` with shear modulus `Σ μn`.
    Ogden,

    /// Ogden in the Marc convention, `[μ1..μN, α1..αN, κ]`.
    ///
    /// Each term is scaled by `μn` instead of `2μn/αn`, and the volumetric
    /// response is `3κ(J^(1/3) − 1)J^(-2/3)`.
    OgdenMarc,
}

impl Material {
    /// Every model, in declaration order.
    pub const ALL: [Material; 6] = [
        Self::NeoHookean,
        Self::Yeoh,
        Self::Mooney5,
        Self::EightChain,
        Self::Ogden,
        Self::OgdenMarc,
    ];

    /// Returns the model name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::NeoHookean => "NeoHookean",
            Self::Yeoh => "Yeoh",
            Self::Mooney5 => "Mooney5",
            Self::EightChain => "EightChain",
            Self::Ogden => "Ogden",
            Self::OgdenMarc => "OgdenMarc",
        }
    }

    /// Checks a parameter vector length against the model.
    ///
    /// Returns the length unchanged when it is valid. Ogden variants accept
    /// any odd length of at least three (`N ≥ 1` terms plus `κ`).
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidParameterCount`] otherwise.
    pub fn parameter_count(self, len: usize) -> Result<usize, MaterialError> {
        let (valid, expected) = match self {
            Self::NeoHookean => (len == 2, "2"),
            Self::Yeoh => (len == 4, "4"),
            Self::Mooney5 => (len == 6, "6"),
            Self::EightChain => (len == 3, "3"),
            Self::Ogden | Self::OgdenMarc => (
                len >= 3 && len % 2 == 1,
                "an odd number (at least 3) of",
            ),
        };
        if valid {
            Ok(len)
        } else {
            Err(MaterialError::InvalidParameterCount {
                model: self.name(),
                expected,
                found: len,
            })
        }
    }

    /// Computes the Cauchy stress for the deformation gradient `f`.
    ///
    /// # Errors
    ///
    /// Returns an error if `J ≤ 0` or the parameter vector has the wrong
    /// length for the model.
    pub fn stress(self, f: &Tensor, params: &[f64]) -> Result<Tensor, MaterialError> {
        let jacobian = tensor::validate(f)?;
        self.parameter_count(params.len())?;

        let stress = match self {
            Self::NeoHookean => neo_hookean::stress(f, jacobian, params),
            Self::Yeoh => yeoh::stress(f, jacobian, params),
            Self::Mooney5 => mooney::stress(f, jacobian, params),
            Self::EightChain => eight_chain::stress(f, jacobian, params),
            Self::Ogden => ogden::stress(f, jacobian, params)?,
            Self::OgdenMarc => ogden::stress_marc(f, jacobian, params)?,
        };
        Ok(stress)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A material with fixed parameters, callable as a [`Model`] from
/// deformation gradient to Cauchy stress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialPoint<'a> {
    pub material: Material,
    pub params: &'a [f64],
}

impl<'a> MaterialPoint<'a> {
    #[must_use]
    pub fn new(material: Material, params: &'a [f64]) -> Self {
        Self { material, params }
    }
}

impl Model for MaterialPoint<'_> {
    type Input = Tensor;
    type Output = Tensor;
    type Error = MaterialError;

    fn call(&self, f: &Tensor) -> Result<Tensor, Self::Error> {
        self.material.stress(f, self.params)
    }
}

/// The common volumetric stress `κ(J − 1)·I`.
fn volumetric(kappa: f64, jacobian: f64) -> Tensor {
    Tensor::identity() * (kappa * (jacobian - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    /// A valid parameter vector for each model.
    fn params(material: Material) -> Vec<f64> {
        match material {
            Material::NeoHookean => vec![1.0, 100.0],
            Material::Yeoh => vec![1.0, -0.01, 1e-4, 100.0],
            Material::Mooney5 => vec![0.175, 0.05, 0.01, -1.35e-3, 3.9e-5, 100.0],
            Material::EightChain => vec![1.0, 3.0, 100.0],
            Material::Ogden | Material::OgdenMarc => vec![1.0, 2.0, 1.1, 0.4, 100.0],
        }
    }

    #[test]
    fn identity_gives_zero_stress_for_every_model() {
        for material in Material::ALL {
            let stress = material.stress(&Tensor::identity(), &params(material)).unwrap();
            assert_relative_eq!(stress, Tensor::zeros(), epsilon = 1e-12);
        }
    }

    #[test]
    fn stress_is_symmetric_for_every_model() {
        let f = Tensor::new(1.3, 0.2, 0.0, 0.1, 0.9, 0.05, 0.0, -0.1, 1.1);
        for material in Material::ALL {
            let stress = material.stress(&f, &params(material)).unwrap();
            assert_relative_eq!(stress, stress.transpose(), epsilon = 1e-10);
        }
    }

    #[test]
    fn pure_dilatation_is_hydrostatic() {
        let f = Tensor::identity() * 1.05;
        for material in Material::ALL {
            let stress = material.stress(&f, &params(material)).unwrap();
            assert_relative_eq!(stress[(0, 1)], 0.0, epsilon = 1e-10);
            assert_relative_eq!(stress[(0, 0)], stress[(1, 1)], epsilon = 1e-10);
            assert_relative_eq!(stress[(1, 1)], stress[(2, 2)], epsilon = 1e-10);
            assert!(stress[(0, 0)] > 0.0);
        }
    }

    #[test]
    fn rejects_non_positive_jacobian() {
        let f = Tensor::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
        for material in Material::ALL {
            assert!(matches!(
                material.stress(&f, &params(material)),
                Err(MaterialError::NonPositiveJacobian { .. })
            ));
        }
    }

    #[test]
    fn rejects_wrong_parameter_counts() {
        let f = Tensor::identity();
        assert_eq!(
            Material::Yeoh.stress(&f, &[1.0, 2.0, 3.0]),
            Err(MaterialError::InvalidParameterCount {
                model: "Yeoh",
                expected: "4",
                found: 3,
            })
        );
        assert!(Material::Ogden.stress(&f, &[1.0, 2.0, 3.0, 4.0]).is_err());
        assert!(Material::OgdenMarc.stress(&f, &[1.0]).is_err());
        assert_eq!(Material::Ogden.parameter_count(7), Ok(7));
    }

    #[test]
    fn material_point_is_a_model() {
        let params = params(Material::Yeoh);
        let point = MaterialPoint::new(Material::Yeoh, &params);
        let f = Tensor::from_diagonal(&Vector3::new(1.2, 0.95, 0.95));

        assert_eq!(point.call(&f), Material::Yeoh.stress(&f, &params));
        assert_eq!(Material::Mooney5.to_string(), "Mooney5");
    }
}
