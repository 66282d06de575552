//! Stress responses under the standard homogeneous test deformations.
//!
//! A [`DeformationMode`] pairs a [`Loading`] (which stretches are imposed)
//! with a [`Volume`] treatment (how the transverse stretch is found). For an
//! axial true strain `ε` the imposed stretch is `λ1 = exp(ε)`:
//!
//! | loading | gradient | lateral component | volume-preserving transverse |
//! |---|---|---|---|
//! | [`Loading::Uniaxial`] | `diag(λ1, λ2, λ2)` | `σ11` | `λ2 = 1/√λ1` |
//! | [`Loading::Biaxial`] | `diag(λ1, λ1, λ3)` | `σ22` | `λ3 = 1/λ1²` |
//! | [`Loading::Planar`] | `diag(λ1, 1, λ3)` | `σ22` | `λ3 = 1/λ1` |
//!
//! A compressible material finds the transverse stretch that makes the
//! lateral stress vanish with a one-dimensional Nelder–Mead search, started
//! from the volume-preserving value. An incompressible material uses the
//! volume-preserving value directly, drops the volumetric term by appending
//! `κ = 0` to the parameters, and reports the axial component `σ00` of the
//! resulting deviatoric stress. No pressure is solved for, so the lateral
//! component is generally not zero.

use std::{convert::Infallible, fmt};

use hyperfit_core::MinimizationProblem;
use hyperfit_observers::RecoverFailures;
use hyperfit_solvers::optimization::{Domain, nelder_mead};
use nalgebra::Vector3;
use thiserror::Error;

use crate::{Material, MaterialError, MaterialPoint, Tensor};

/// The imposed stretch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Loading {
    Uniaxial,

    /// Equal stretch along both in-plane axes.
    Biaxial,

    /// Pure shear: the second axis is held at its original length.
    Planar,
}

impl Loading {
    /// Builds the diagonal deformation gradient for the given stretches.
    #[must_use]
    pub fn gradient(self, axial: f64, transverse: f64) -> Tensor {
        let diagonal = match self {
            Self::Uniaxial => [axial, transverse, transverse],
            Self::Biaxial => [axial, axial, transverse],
            Self::Planar => [axial, 1.0, transverse],
        };
        Tensor::from_diagonal(&Vector3::from(diagonal))
    }

    /// Returns the transverse stretch that keeps `J = 1`.
    #[must_use]
    pub fn incompressible_transverse(self, axial: f64) -> f64 {
        match self {
            Self::Uniaxial => axial.sqrt().recip(),
            Self::Biaxial => axial.powi(2).recip(),
            Self::Planar => axial.recip(),
        }
    }

    /// Returns the diagonal index of the stress component that must vanish.
    #[must_use]
    pub fn lateral_index(self) -> usize {
        match self {
            Self::Uniaxial => 1,
            Self::Biaxial | Self::Planar => 2,
        }
    }
}

impl fmt::Display for Loading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uniaxial => "uniaxial",
            Self::Biaxial => "biaxial",
            Self::Planar => "planar",
        })
    }
}

/// How the transverse stretch is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Volume {
    /// Solve for the stretch at which the lateral stress vanishes.
    ///
    /// The parameter vector includes the bulk modulus `κ`.
    Compressible,

    /// Keep `J = 1` and drop the volumetric term.
    ///
    /// The parameter vector omits `κ`.
    Incompressible,
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compressible => "compressible",
            Self::Incompressible => "incompressible",
        })
    }
}

/// A loading paired with a volume treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeformationMode {
    pub loading: Loading,
    pub volume: Volume,
}

/// The solved response to a strain history.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Axial true stress per strain sample.
    pub stress: Vec<f64>,

    /// Transverse stretch per strain sample.
    pub transverse: Vec<f64>,

    /// Number of samples whose lateral search hit its iteration limit.
    ///
    /// Always zero for incompressible modes.
    pub unconverged: usize,
}

/// Errors that can occur when computing a deformation-mode response.
#[derive(Debug, Error)]
pub enum DeformationError {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error("lateral stress search failed: {0}")]
    Solver(#[from] nelder_mead::Error),
}

impl DeformationMode {
    #[must_use]
    pub const fn new(loading: Loading, volume: Volume) -> Self {
        Self { loading, volume }
    }

    /// Computes the axial true stress for each strain sample.
    ///
    /// `config` controls the lateral search of compressible modes and is
    /// ignored otherwise. The result has the same length as `strain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter vector does not fit the material or
    /// a lateral search fails.
    pub fn stress(
        self,
        material: Material,
        strain: &[f64],
        params: &[f64],
        config: &nelder_mead::Config,
    ) -> Result<Vec<f64>, DeformationError> {
        self.response(material, strain, params, config)
            .map(|response| response.stress)
    }

    /// Computes the axial stress and transverse stretch for each sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter vector does not fit the material or
    /// a lateral search fails.
    pub fn response(
        self,
        material: Material,
        strain: &[f64],
        params: &[f64],
        config: &nelder_mead::Config,
    ) -> Result<Response, DeformationError> {
        match self.volume {
            Volume::Compressible => self.compressible(material, strain, params, config),
            Volume::Incompressible => self.incompressible(material, strain, params),
        }
    }

    fn compressible(
        self,
        material: Material,
        strain: &[f64],
        params: &[f64],
        config: &nelder_mead::Config,
    ) -> Result<Response, DeformationError> {
        // Every trial would fail the same way, so report it up front.
        material.parameter_count(params.len())?;

        let model = MaterialPoint::new(material, params);
        let domain = Domain::unbounded(1);
        let mut response = Response::with_capacity(strain.len());

        for &sample in strain {
            let problem = LateralStress {
                loading: self.loading,
                axial: sample.exp(),
            };
            let guess = self.loading.incompressible_transverse(problem.axial);

            let solution = nelder_mead::minimize(
                &model,
                &problem,
                &[guess],
                &domain,
                config,
                RecoverFailures::new(),
            )?;

            if !solution.status.is_converged() {
                tracing::debug!(
                    %material,
                    mode = %self,
                    strain = sample,
                    lateral = solution.objective,
                    iters = solution.iters,
                    "lateral stress search did not converge",
                );
                response.unconverged += 1;
            }
            response.stress.push(solution.snapshot.output[(0, 0)]);
            response.transverse.push(solution.x[0]);
        }

        Ok(response)
    }

    fn incompressible(
        self,
        material: Material,
        strain: &[f64],
        params: &[f64],
    ) -> Result<Response, DeformationError> {
        let mut extended = Vec::with_capacity(params.len() + 1);
        extended.extend_from_slice(params);
        extended.push(0.0);

        let mut response = Response::with_capacity(strain.len());

        for &sample in strain {
            let axial = sample.exp();
            let transverse = self.loading.incompressible_transverse(axial);
            let stress = material.stress(&self.loading.gradient(axial, transverse), &extended)?;

            response.stress.push(stress[(0, 0)]);
            response.transverse.push(transverse);
        }

        Ok(response)
    }
}

impl fmt::Display for DeformationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.volume, self.loading)
    }
}

impl Response {
    fn with_capacity(samples: usize) -> Self {
        Self {
            stress: Vec::with_capacity(samples),
            transverse: Vec::with_capacity(samples),
            unconverged: 0,
        }
    }
}

/// Drives the magnitude of the lateral stress to zero at a fixed axial
/// stretch, with the transverse stretch as the only solver variable.
#[derive(Debug, Clone, Copy)]
struct LateralStress {
    loading: Loading,
    axial: f64,
}

impl MinimizationProblem for LateralStress {
    type Input = Tensor;
    type Output = Tensor;
    type Error = Infallible;

    fn input(&self, x: &[f64]) -> Result<Tensor, Self::Error> {
        Ok(self.loading.gradient(self.axial, x[0]))
    }

    fn objective(&self, _f: &Tensor, stress: &Tensor) -> Result<f64, Self::Error> {
        let i = self.loading.lateral_index();
        Ok(stress[(i, i)].abs())
    }
}
