//! Hyperelastic material models and their responses under standard test
//! deformations.
//!
//! - [`tensor`]: kinematic kernel with jacobian, Cauchy–Green tensors,
//!   invariants, deviatoric split and principal stretches
//! - [`Material`]: the model set, each mapping a deformation gradient and a
//!   parameter vector to the Cauchy stress
//! - [`DeformationMode`]: uniaxial, biaxial and planar stress histories for
//!   compressible or incompressible materials
//!
//! ```
//! use hyperfit_materials::{DeformationMode, Loading, Material, Volume};
//! use hyperfit_solvers::optimization::nelder_mead;
//!
//! let mode = DeformationMode::new(Loading::Uniaxial, Volume::Incompressible);
//! let stress = mode
//!     .stress(Material::NeoHookean, &[0.0, 0.1, 0.2], &[1.0], &nelder_mead::Config::default())
//!     .unwrap();
//!
//! assert_eq!(stress.len(), 3);
//! assert_eq!(stress[0], 0.0);
//! ```

pub mod deformation;
mod error;
mod material;
pub mod tensor;

pub use deformation::{DeformationError, DeformationMode, Loading, Response, Volume};
pub use error::MaterialError;
pub use material::{Material, MaterialPoint};
pub use tensor::Tensor;
