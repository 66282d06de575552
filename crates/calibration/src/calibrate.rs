//! Calibration of material parameters against experimental tests.
//!
//! A [`Calibrator`] collects the tests, the error measure and any parameter
//! constraints, then runs one of two searches:
//!
//! - [`Calibrator::global`]: differential evolution over finite bounds,
//!   optionally polished with Nelder–Mead
//! - [`Calibrator::local`]: bounded Nelder–Mead from an initial guess
//!
//! Both rank constrained candidates feasibility-first and rank parameter
//! sets whose prediction fails behind every other candidate.

use std::{fmt, sync::Arc};

use hyperfit_core::Observer;
use hyperfit_materials::{Material, MaterialError, Volume};
use hyperfit_observers::{Chain, RecoverFailures, TracingObserver};
use hyperfit_solvers::optimization::{
    Bounds, Constraint, Domain, LinearConstraint, NonlinearConstraint, Status,
    differential_evolution as de, nelder_mead as nm,
};
use thiserror::Error;

use crate::{ErrorMeasure, Fitness, Test};

/// The outcome of a calibration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    /// Best parameter vector found.
    pub params: Vec<f64>,

    /// Fitness at `params`, as a percentage.
    pub error: f64,

    /// Total constraint violation at `params`, zero when feasible.
    pub violation: f64,

    /// Why the search stopped.
    pub status: Status,

    /// Iterations (simplex steps or generations) performed.
    pub iters: usize,

    /// Fitness evaluations performed.
    pub evaluations: usize,

    /// Predicted stress per test at `params`, without the reference sample.
    pub predicted: Vec<Vec<f64>>,
}

/// Errors that can occur while calibrating.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("calibration needs at least one test")]
    NoTests,

    #[error("parameter space does not fit the material: {0}")]
    Material(#[from] MaterialError),

    #[error("constraint {index} is written for {found} parameters, expected {expected}")]
    ConstraintMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("global search failed: {0}")]
    Global(#[from] de::Error),

    #[error("local search failed: {0}")]
    Local(#[from] nm::Error),
}

/// Fits one parameter vector of a material to a set of tests.
pub struct Calibrator {
    material: Material,
    tests: Vec<Test>,
    measure: ErrorMeasure,
    lateral: nm::Config,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl Calibrator {
    /// Creates a calibrator using the relative error measure.
    ///
    /// Compressible tests fit the full parameter vector, including `κ`.
    /// Incompressible tests fit it without `κ`. All tests must agree.
    ///
    /// # Errors
    ///
    /// Returns an error if `tests` is empty.
    pub fn new(material: Material, tests: Vec<Test>) -> Result<Self, CalibrationError> {
        if tests.is_empty() {
            return Err(CalibrationError::NoTests);
        }
        Ok(Self {
            material,
            tests,
            measure: ErrorMeasure::default(),
            lateral: nm::Config::default(),
            constraints: Vec::new(),
        })
    }

    /// Sets the error measure.
    #[must_use]
    pub fn measure(self, measure: ErrorMeasure) -> Self {
        Self { measure, ..self }
    }

    /// Sets the lateral stress search used by compressible tests.
    #[must_use]
    pub fn lateral(self, lateral: nm::Config) -> Self {
        Self { lateral, ..self }
    }

    /// Adds a constraint `lower <= A·params <= upper`.
    #[must_use]
    pub fn linear_constraint(self, constraint: LinearConstraint) -> Self {
        self.constraint(constraint)
    }

    /// Adds a constraint `lower <= g(params) <= upper`.
    #[must_use]
    pub fn nonlinear_constraint<F>(self, constraint: NonlinearConstraint<F>) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        self.constraint(constraint)
    }

    /// Adds any inequality constraint on the parameters.
    #[must_use]
    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    #[must_use]
    pub fn material(&self) -> Material {
        self.material
    }

    #[must_use]
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// Returns the objective the searches minimize.
    #[must_use]
    pub fn fitness(&self) -> Fitness<'_> {
        Fitness {
            material: self.material,
            tests: &self.tests,
            measure: self.measure,
            lateral: self.lateral,
        }
    }

    /// Searches the whole of `bounds` with differential evolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds or a constraint do not match the
    /// material's parameter count, the bounds are not finite, or the search
    /// fails.
    pub fn global(
        &self,
        bounds: Bounds,
        config: &de::Config,
    ) -> Result<Calibration, CalibrationError> {
        self.global_observed(bounds, config, ())
    }

    /// Like [`Calibrator::global`], with `observer` also receiving every
    /// solver event.
    ///
    /// Failed predictions are already ranked behind every other candidate,
    /// so the observer's action only matters for successful evaluations.
    /// Pass a [`StopBelow`] to end the search once the fit is good enough.
    ///
    /// # Errors
    ///
    /// Same as [`Calibrator::global`].
    ///
    /// [`StopBelow`]: hyperfit_observers::StopBelow
    pub fn global_observed<'s, Obs>(
        &'s self,
        bounds: Bounds,
        config: &de::Config,
        observer: Obs,
    ) -> Result<Calibration, CalibrationError>
    where
        Obs: for<'a> Observer<de::Event<'a, Fitness<'s>, Fitness<'s>>, de::Action>,
    {
        let domain = self.domain(bounds)?;
        let fitness = self.fitness();
        let population = config.population_size(domain.dims());
        tracing::info!(
            material = %self.material,
            tests = self.tests.len(),
            dims = domain.dims(),
            population,
            "starting global calibration",
        );

        let observer = Chain(
            Chain(
                RecoverFailures::new(),
                TracingObserver::per_generation("differential_evolution", population),
            ),
            observer,
        );
        let solution = de::minimize(&fitness, &fitness, &domain, config, observer)?;

        Ok(self.finish(Calibration {
            params: solution.x,
            error: solution.objective,
            violation: solution.violation,
            status: solution.status,
            iters: solution.iters,
            evaluations: solution.evaluations,
            predicted: solution.snapshot.output,
        }))
    }

    /// Refines `initial` within `bounds` with Nelder–Mead.
    ///
    /// Infinite bounds are allowed. The initial guess is clipped into them
    /// and may violate the constraints. The iteration and evaluation limits
    /// come from `config` alone: [`nm::Config::default`] allows 200 of each
    /// whatever the parameter count, while [`nm::Config::scaled`] allows 200
    /// per parameter. Constrained fits and fits that end on a bound restart
    /// the simplex at least once and need the larger budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds or a constraint do not match the
    /// material's parameter count, the initial guess does not match the
    /// bounds, or the search fails.
    pub fn local(
        &self,
        bounds: Bounds,
        initial: &[f64],
        config: &nm::Config,
    ) -> Result<Calibration, CalibrationError> {
        self.local_observed(bounds, initial, config, ())
    }

    /// Like [`Calibrator::local`], with `observer` also receiving every
    /// solver event.
    ///
    /// # Errors
    ///
    /// Same as [`Calibrator::local`].
    pub fn local_observed<'s, Obs>(
        &'s self,
        bounds: Bounds,
        initial: &[f64],
        config: &nm::Config,
        observer: Obs,
    ) -> Result<Calibration, CalibrationError>
    where
        Obs: for<'a> Observer<nm::Event<'a, Fitness<'s>, Fitness<'s>>, nm::Action>,
    {
        let domain = self.domain(bounds)?;
        let fitness = self.fitness();
        tracing::info!(
            material = %self.material,
            tests = self.tests.len(),
            dims = domain.dims(),
            "starting local calibration",
        );

        let observer = Chain(
            Chain(
                RecoverFailures::new(),
                TracingObserver::new("nelder_mead").every(domain.dims() + 1),
            ),
            observer,
        );
        let solution = nm::minimize(&fitness, &fitness, initial, &domain, config, observer)?;

        Ok(self.finish(Calibration {
            params: solution.x,
            error: solution.objective,
            violation: solution.violation,
            status: solution.status,
            iters: solution.iters,
            evaluations: solution.evaluations,
            predicted: solution.snapshot.output,
        }))
    }

    /// Checks the search space against every test and attaches the
    /// constraints.
    fn domain(&self, bounds: Bounds) -> Result<Domain, CalibrationError> {
        let dims = bounds.dims();
        for test in &self.tests {
            let len = match test.mode().volume {
                Volume::Compressible => dims,
                Volume::Incompressible => dims + 1,
            };
            self.material.parameter_count(len)?;
        }

        let mut domain = Domain::new(bounds);
        for (index, constraint) in self.constraints.iter().enumerate() {
            if let Some(found) = constraint.dims().filter(|&found| found != dims) {
                return Err(CalibrationError::ConstraintMismatch {
                    index,
                    expected: dims,
                    found,
                });
            }
            domain.push_constraint(Box::new(Arc::clone(constraint)));
        }
        Ok(domain)
    }

    fn finish(&self, calibration: Calibration) -> Calibration {
        tracing::info!(
            material = %self.material,
            error = calibration.error,
            violation = calibration.violation,
            status = ?calibration.status,
            evaluations = calibration.evaluations,
            "calibration finished",
        );
        calibration
    }
}

impl fmt::Debug for Calibrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calibrator")
            .field("material", &self.material)
            .field("tests", &self.tests)
            .field("measure", &self.measure)
            .field("lateral", &self.lateral)
            .field("constraints", &self.constraints.len())
            .finish()
    }
}
