//! Shared fixtures for the end-to-end calibration tests.

use hyperfit_calibration::Test;
use hyperfit_materials::{DeformationMode, Material};
use hyperfit_solvers::optimization::nelder_mead;

/// Returns `samples` evenly spaced strains from zero to `max`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(max: f64, samples: usize) -> Vec<f64> {
    let last = (samples.max(2) - 1) as f64;
    (0..samples).map(|i| max * i as f64 / last).collect()
}

/// Builds a test whose stress is the exact response of `material`.
///
/// # Panics
///
/// Panics if the parameters do not fit the material and mode.
#[must_use]
pub fn synthetic(
    material: Material,
    params: &[f64],
    mode: DeformationMode,
    strain: Vec<f64>,
) -> Test {
    let stress = mode
        .stress(material, &strain, params, &nelder_mead::Config::default())
        .expect("synthetic parameters fit the material");
    Test::new(mode, strain, stress).expect("synthetic curves are valid")
}
