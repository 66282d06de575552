//! Calibration of hyperelastic material parameters against experimental
//! stress–strain curves.
//!
//! - [`ErrorMeasure`]: normalized, scale-invariant curve errors
//! - [`Test`]: one measured curve and the deformation mode it came from
//! - [`Fitness`]: mean error of the predicted curves, usable directly as a
//!   solver model and minimization problem
//! - [`Calibrator`]: global (differential evolution) and local
//!   (Nelder–Mead) parameter searches with optional constraints
//!
//! ```no_run
//! use hyperfit_calibration::{Calibrator, Test};
//! use hyperfit_materials::{DeformationMode, Loading, Material, Volume};
//! use hyperfit_solvers::optimization::{Bounds, differential_evolution};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mode = DeformationMode::new(Loading::Uniaxial, Volume::Incompressible);
//! let test = Test::new(mode, vec![0.0, 0.1, 0.2, 0.3], vec![0.0, 0.36, 0.78, 1.26])?;
//!
//! let calibration = Calibrator::new(Material::Yeoh, vec![test])?.global(
//!     Bounds::new(vec![0.0, -1.0, -0.1], vec![10.0, 1.0, 0.1])?,
//!     &differential_evolution::Config::default(),
//! )?;
//! println!("{:?} at {:.3}%", calibration.params, calibration.error);
//! # Ok(())
//! # }
//! ```

mod calibrate;
mod experiment;
mod fitness;
mod measure;

pub use calibrate::{Calibration, CalibrationError, Calibrator};
pub use experiment::{Test, TestError};
pub use fitness::{Fitness, FitnessError};
pub use measure::{ErrorMeasure, MeasureError, nmad, nrms, re};
