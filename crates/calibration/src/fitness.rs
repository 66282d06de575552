//! The calibration objective.
//!
//! A [`Fitness`] predicts each test's stress curve from a candidate
//! parameter vector and scores it against the measured curve. The first
//! sample of every test is the reference state and is left out of both the
//! prediction and the comparison. With several tests the fitness is the
//! unweighted mean of the per-test errors.

use hyperfit_core::{MinimizationProblem, Model};
use hyperfit_materials::{DeformationError, Material};
use hyperfit_solvers::optimization::nelder_mead;
use thiserror::Error;

use crate::{ErrorMeasure, MeasureError, Test};

/// Scores material parameters against a set of experimental tests.
#[derive(Debug, Clone, Copy)]
pub struct Fitness<'a> {
    pub material: Material,
    pub tests: &'a [Test],
    pub measure: ErrorMeasure,

    /// Lateral stress search used by compressible tests.
    pub lateral: nelder_mead::Config,
}

/// Errors that can occur when evaluating a [`Fitness`].
#[derive(Debug, Error)]
pub enum FitnessError {
    #[error("stress prediction failed: {0}")]
    Deformation(#[from] DeformationError),

    #[error(transparent)]
    Measure(#[from] MeasureError),
}

impl<'a> Fitness<'a> {
    /// Creates a fitness with the relative error measure and the default
    /// lateral search.
    #[must_use]
    pub fn new(material: Material, tests: &'a [Test]) -> Self {
        Self {
            material,
            tests,
            measure: ErrorMeasure::default(),
            lateral: nelder_mead::Config::default(),
        }
    }

    /// Predicts each test's stress curve, without its reference sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters do not fit the material or a
    /// lateral search fails.
    pub fn predict(&self, params: &[f64]) -> Result<Vec<Vec<f64>>, DeformationError> {
        self.tests
            .iter()
            .map(|test| {
                test.mode()
                    .stress(self.material, &test.strain()[1..], params, &self.lateral)
            })
            .collect()
    }

    /// Scores predicted curves, as returned by [`Fitness::predict`].
    ///
    /// # Errors
    ///
    /// Returns an error if a predicted curve does not match its test.
    pub fn score(&self, predicted: &[Vec<f64>]) -> Result<f64, MeasureError> {
        if predicted.len() != self.tests.len() {
            return Err(MeasureError::LengthMismatch {
                experimental: self.tests.len(),
                predicted: predicted.len(),
            });
        }

        let total = self
            .tests
            .iter()
            .zip(predicted)
            .map(|(test, curve)| self.measure.evaluate(&test.stress()[1..], curve))
            .sum::<Result<f64, _>>()?;

        #[allow(clippy::cast_precision_loss)]
        Ok(total / self.tests.len() as f64)
    }

    /// Returns the mean error of the prediction for `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prediction fails.
    pub fn evaluate(&self, params: &[f64]) -> Result<f64, FitnessError> {
        let predicted = self.predict(params)?;
        Ok(self.score(&predicted)?)
    }
}

impl Model for Fitness<'_> {
    type Input = Vec<f64>;
    type Output = Vec<Vec<f64>>;
    type Error = DeformationError;

    fn call(&self, params: &Vec<f64>) -> Result<Self::Output, Self::Error> {
        self.predict(params)
    }
}

impl MinimizationProblem for Fitness<'_> {
    type Input = Vec<f64>;
    type Output = Vec<Vec<f64>>;
    type Error = MeasureError;

    fn input(&self, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        Ok(x.to_vec())
    }

    fn objective(
        &self,
        _params: &Vec<f64>,
        predicted: &Vec<Vec<f64>>,
    ) -> Result<f64, Self::Error> {
        self.score(predicted)
    }
}
